use crate::level::Level;
use crate::location::CallSite;
use crate::value::{FieldValue, Fields};

/// Inputs of one log statement: level, template, tags, suppressed keys and
/// caller fields.
///
/// The call site is captured where the `LogCall` is created, so build it at
/// the logging statement itself (or pass [`callsite!`](crate::callsite) to
/// [`at`](Self::at)).
///
/// ```
/// use jaylog::{Level, LogCall};
///
/// let call = LogCall::new(Level::Info, "user $user logged in")
///     .tag("auth")
///     .field("user", "alice")
///     .without("location");
/// assert_eq!(call.tags(), ["auth"]);
/// ```
#[derive(Debug, Clone)]
pub struct LogCall {
    level: Level,
    template: String,
    tags: Vec<String>,
    without: Vec<String>,
    fields: Fields,
    site: CallSite,
}

impl LogCall {
    #[track_caller]
    pub fn new(level: Level, template: impl Into<String>) -> Self {
        LogCall {
            level,
            template: template.into(),
            tags: Vec::new(),
            without: Vec::new(),
            fields: Fields::new(),
            site: CallSite::caller(),
        }
    }

    #[track_caller]
    pub fn debug(template: impl Into<String>) -> Self {
        Self::new(Level::Debug, template)
    }

    #[track_caller]
    pub fn info(template: impl Into<String>) -> Self {
        Self::new(Level::Info, template)
    }

    #[track_caller]
    pub fn warning(template: impl Into<String>) -> Self {
        Self::new(Level::Warning, template)
    }

    #[track_caller]
    pub fn error(template: impl Into<String>) -> Self {
        Self::new(Level::Error, template)
    }

    #[track_caller]
    pub fn critical(template: impl Into<String>) -> Self {
        Self::new(Level::Critical, template)
    }

    /// Append one tag. Order is kept; duplicates are allowed.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn tags_from<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Omit the builder-computed field stored under `key`.
    pub fn without(mut self, key: impl Into<String>) -> Self {
        self.without.push(key.into());
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key, value);
        self
    }

    /// Merge `fields` into the caller fields; later keys replace earlier ones.
    pub fn fields(mut self, fields: Fields) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Override the captured call site.
    pub fn at(mut self, site: CallSite) -> Self {
        self.site = site;
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn suppressed(&self) -> &[String] {
        &self.without
    }

    pub fn caller_fields(&self) -> &Fields {
        &self.fields
    }

    pub fn site(&self) -> CallSite {
        self.site
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_call_site_of_constructor() {
        let call = LogCall::info("x");
        assert!(call.site().file.ends_with("call.rs"));
        assert_eq!(call.site().module, None);
        let line = line!() - 3;
        assert_eq!(call.site().line, line);
    }

    #[test]
    fn collects_tags_fields_and_suppression() {
        let call = LogCall::debug("")
            .tag("TAG1")
            .tags_from(["TAG2", "TAG3"])
            .field("a", 1)
            .fields(crate::fields! { "a" => 2, "b" => "x" })
            .without("location");
        assert_eq!(call.level(), Level::Debug);
        assert_eq!(call.tags(), ["TAG1", "TAG2", "TAG3"]);
        assert_eq!(call.suppressed(), ["location"]);
        assert_eq!(call.caller_fields().get("a"), Some(&FieldValue::Int(2)));
        assert_eq!(call.caller_fields().len(), 2);
    }

    #[test]
    fn explicit_site_wins() {
        let call = LogCall::error("boom").at(crate::callsite!());
        assert_eq!(call.site().module, Some("jaylog::call::tests"));
    }
}
