#[doc(hidden)]
#[macro_export]
macro_rules! cfg_chrono {
    ($($item:item)*) => {
        $( #[cfg(feature = "chrono")] $item )*
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! cfg_smallvec {
    ($($item:item)*) => {
        $( #[cfg(feature = "smallvec")] $item )*
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! cfg_env_filter {
    ($($item:item)*) => {
        $( #[cfg(feature = "env-filter")] $item )*
    }
}
