//! Attribute system for simulated page elements
//!
//! - Direct `Vec<(String, String)>` for attributes, as parsed from markup
//! - `class` is kept as a whitespace-separated token list so marker updates
//!   behave like `Element.classList`

/// Element attributes as simple key-value pairs
pub type Attrs = Vec<(String, String)>;

/// Extension trait for attribute operations on Attrs
pub trait AttrsExt {
    /// Get an attribute value by name
    fn get_attr(&self, name: &str) -> Option<&str>;

    /// Check if an attribute exists
    fn has_attr(&self, name: &str) -> bool;

    /// Set an attribute value (insert or update)
    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>);

    /// Remove an attribute by name, returning the old value if present
    fn remove_attr(&mut self, name: &str) -> Option<String>;

    /// Whether the `class` attribute contains `class` as a token
    fn has_class(&self, class: &str) -> bool;

    /// Add a class token; no-op if already present
    fn add_class(&mut self, class: &str);

    /// Remove a class token; drops the attribute once no tokens remain
    fn remove_class(&mut self, class: &str);
}

impl AttrsExt for Attrs {
    fn get_attr(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn has_attr(&self, name: &str) -> bool {
        self.iter().any(|(k, _)| k == name)
    }

    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(attr) = self.iter_mut().find(|(k, _)| k == &name) {
            attr.1 = value;
        } else {
            self.push((name, value));
        }
    }

    fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.iter()
            .position(|(k, _)| k == name)
            .map(|pos| self.remove(pos).1)
    }

    fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class))
    }

    fn add_class(&mut self, class: &str) {
        if class.is_empty() || self.has_class(class) {
            return;
        }
        let list = match self.get_attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
            _ => class.to_string(),
        };
        self.set_attr("class", list);
    }

    fn remove_class(&mut self, class: &str) {
        let Some(existing) = self.get_attr("class") else {
            return;
        };
        let list = existing
            .split_ascii_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        if list.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_attr("class", list);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attrs_operations() {
        let mut attrs: Attrs = Vec::new();

        attrs.set_attr("id", "toc");
        attrs.set_attr("href", "#intro");
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get_attr("id"), Some("toc"));
        assert!(!attrs.has_attr("class"));

        attrs.set_attr("href", "#setup");
        assert_eq!(attrs.get_attr("href"), Some("#setup"));
        assert_eq!(attrs.len(), 2);

        assert_eq!(attrs.remove_attr("id").as_deref(), Some("toc"));
        assert!(!attrs.has_attr("id"));
    }

    #[test]
    fn test_class_tokens() {
        let mut attrs: Attrs = vec![("class".into(), "sectlevel1 theme-dark".into())];

        attrs.add_class("active");
        attrs.add_class("active");
        assert_eq!(attrs.get_attr("class"), Some("sectlevel1 theme-dark active"));
        assert!(attrs.has_class("active"));
        assert!(!attrs.has_class("act"));

        attrs.remove_class("active");
        assert_eq!(attrs.get_attr("class"), Some("sectlevel1 theme-dark"));
        assert!(attrs.has_class("theme-dark"));

        attrs.remove_class("sectlevel1");
        attrs.remove_class("theme-dark");
        assert!(!attrs.has_attr("class"));
    }
}
