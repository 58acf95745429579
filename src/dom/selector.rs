use crate::dom::ElementId;

/// The small selector subset the page scripts rely on.
///
/// `#id`, `.class`, `[attr]` and bare tag names, plus comma-separated lists
/// of those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(ElementId),
    Class(String),
    Attr(String),
    Tag(String),
    Any(Vec<Selector>),
}

impl Selector {
    pub fn parse(s: &str) -> Self {
        let parts: Vec<&str> = s
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        match parts.as_slice() {
            [single] => Self::parse_simple(single),
            many => Self::Any(many.iter().map(|p| Self::parse_simple(p)).collect()),
        }
    }

    fn parse_simple(s: &str) -> Self {
        if let Some(id) = s.strip_prefix('#') {
            Self::Id(ElementId::new(id))
        } else if let Some(class) = s.strip_prefix('.') {
            Self::Class(class.to_string())
        } else if let Some(attr) = s.strip_prefix('[').and_then(|a| a.strip_suffix(']')) {
            Self::Attr(attr.to_string())
        } else {
            Self::Tag(s.to_ascii_lowercase())
        }
    }
}

impl From<&str> for Selector {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_forms() {
        assert_eq!(Selector::parse("#hamburger"), Selector::Id("hamburger".into()));
        assert_eq!(
            Selector::parse(".carousel-slide"),
            Selector::Class("carousel-slide".to_string())
        );
        assert_eq!(
            Selector::parse("[data-src]"),
            Selector::Attr("data-src".to_string())
        );
        assert_eq!(Selector::parse("HEADER"), Selector::Tag("header".to_string()));
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            Selector::parse("a, button,[tabindex]"),
            Selector::Any(vec![
                Selector::Tag("a".to_string()),
                Selector::Tag("button".to_string()),
                Selector::Attr("tabindex".to_string()),
            ])
        );
    }
}
