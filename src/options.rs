//! Configuration for the prettyjson handler.
//!
//! An [`Options`] value is built once with chained calls and never mutated
//! afterwards. Deriving a handler with [`Handler::with_attrs`] or
//! [`Handler::with_group`] clones the options and appends to the clone.
//!
//! [`Handler::with_attrs`]: crate::handler::Handler::with_attrs
//! [`Handler::with_group`]: crate::handler::Handler::with_group
use crate::record::Attr;

/// The theme used when none is given.
pub const DEFAULT_STYLE: &str = "monokai";

/// The renderer used when none is given.
pub const DEFAULT_RENDERER: &str = "terminal256";

/// Formatting options for the prettyjson handler.
///
/// Options apply in the order they are chained. Later calls override earlier
/// ones for `style`, `renderer`, `pretty`, and `color`, while [`attrs`] and
/// [`group`] accumulate.
///
/// # Examples
/// ```
/// # use tracing_prettyjson::options::Options;
/// # use tracing_prettyjson::record::Attr;
/// let options = Options::new()
///     .style("github")
///     .attrs([Attr::new("service", "api")])
///     .group("request");
///
/// assert_eq!(options.style_name(), "github");
/// assert_eq!(options.groups(), ["request"]);
/// ```
///
/// [`attrs`]: Options::attrs
/// [`group`]: Options::group
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    pub(crate) style: String,
    pub(crate) renderer: String,
    pub(crate) pretty: bool,
    pub(crate) color: bool,
    pub(crate) attrs: Vec<ScopedAttr>,
    pub(crate) groups: Vec<String>,
}

/// An attribute and the number of groups that were open when it was attached.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ScopedAttr {
    pub(crate) depth: usize,
    pub(crate) attr: Attr,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            style: DEFAULT_STYLE.to_owned(),
            renderer: DEFAULT_RENDERER.to_owned(),
            pretty: true,
            color: true,
            attrs: Vec::new(),
            groups: Vec::new(),
        }
    }
}

impl Options {
    /// Returns the default options: the `monokai` theme, the `terminal256`
    /// renderer, with indentation and colors enabled.
    pub fn new() -> Self {
        Options::default()
    }

    /// Sets the color theme by name.
    ///
    /// Any theme bundled with `syntect` works, as well as `monokai`, `github`,
    /// `solarized-dark`, and `solarized-light`.
    pub fn style(mut self, name: impl Into<String>) -> Self {
        self.style = name.into();
        self
    }

    /// Sets the terminal renderer by name: `terminal` (8 colors),
    /// `terminal256`, or `terminal16m` (24-bit color).
    pub fn renderer(mut self, name: impl Into<String>) -> Self {
        self.renderer = name.into();
        self
    }

    /// Enables or disables indentation.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Enables or disables ANSI colors.
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Attaches attributes to every record, inside any groups opened so far.
    pub fn attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        let depth = self.groups.len();
        self.attrs
            .extend(attrs.into_iter().map(|attr| ScopedAttr { depth, attr }));
        self
    }

    /// Nests all following attributes under `name`.
    pub fn group(mut self, name: impl Into<String>) -> Self {
        self.groups.push(name.into());
        self
    }

    pub fn style_name(&self) -> &str {
        &self.style
    }

    pub fn renderer_name(&self) -> &str {
        &self.renderer
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    pub fn is_color(&self) -> bool {
        self.color
    }

    /// Returns the attached attributes in attachment order.
    pub fn attr_list(&self) -> impl Iterator<Item = &Attr> {
        self.attrs.iter().map(|scoped| &scoped.attr)
    }

    /// Returns the attached groups, outermost first.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Returns `true` if the handler would write plain JSON.
    pub(crate) fn is_plain(&self) -> bool {
        !self.pretty && !self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_options_override_earlier_ones() {
        let options = Options::new()
            .style("github")
            .pretty(false)
            .style("dracula")
            .pretty(true);

        assert_eq!(options.style_name(), "dracula");
        assert!(options.is_pretty());
        assert!(options.is_color());
    }

    #[test]
    fn attrs_and_groups_accumulate() {
        let options = Options::new()
            .attrs([Attr::new("a", 1)])
            .group("g1")
            .attrs([Attr::new("b", 2)])
            .group("g2");

        assert_eq!(options.groups(), ["g1", "g2"]);

        let scoped: Vec<(usize, &str)> = options
            .attrs
            .iter()
            .map(|scoped| (scoped.depth, scoped.attr.key()))
            .collect();
        assert_eq!(scoped, [(0, "a"), (1, "b")]);
    }

    #[test]
    fn clone_does_not_alias() {
        let original = Options::new().attrs([Attr::new("k", "v")]).group("g");

        let mut copy = original.clone();
        copy.attrs.push(ScopedAttr {
            depth: 0,
            attr: Attr::new("extra", true),
        });
        copy.groups.push("h".to_owned());
        copy.attrs[0].attr = Attr::new("changed", 0);

        assert_eq!(original.attr_list().count(), 1);
        assert_eq!(original.attr_list().next().map(Attr::key), Some("k"));
        assert_eq!(original.groups(), ["g"]);
    }

    #[test]
    fn clone_of_absent_options_is_absent() {
        let absent: Option<Options> = None;
        assert_eq!(absent.clone(), None);
    }

    #[test]
    fn plain_only_when_both_disabled() {
        assert!(!Options::new().is_plain());
        assert!(!Options::new().pretty(false).is_plain());
        assert!(!Options::new().color(false).is_plain());
        assert!(Options::new().pretty(false).color(false).is_plain());
    }
}
