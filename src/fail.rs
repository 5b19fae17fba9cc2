use crate::error::Error;

#[cold]
#[inline(never)]
pub fn span_not_in_ctx<T>() -> T {
    panic!("Span not in context, this is a bug");
}

#[cold]
#[inline(never)]
pub fn span_handler_not_in_exts<T>() -> T {
    panic!("Span extension doesn't contain `SpanHandler`, this is a bug");
}

#[allow(clippy::needless_pass_by_value)]
#[cold]
#[inline(never)]
pub fn handle_error(err: Error) {
    eprintln!("Writing log record failed: {}", err);
}

#[allow(clippy::needless_pass_by_value)]
#[cold]
#[inline(never)]
pub fn derive_error(err: Error) {
    eprintln!("{}, using plain JSON handler...", err);
}

#[cold]
#[inline(never)]
pub fn bundled_theme_invalid<T>(err: syntect::LoadingError) -> T {
    panic!("Bundled monokai theme failed to load: {}, this is a bug", err);
}
