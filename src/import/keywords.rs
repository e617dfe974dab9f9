//! `##KEY##` keyword substitution

/// Ordered set of `##KEY##` → value replacements.
#[derive(Debug, Clone, Default)]
pub struct Keywords {
    tokens: Vec<(String, String)>,
}

impl Keywords {
    /// Build from `(KEY, value)` pairs; each key is wrapped as `##KEY##`.
    pub fn new(replacements: impl IntoIterator<Item = (String, String)>) -> Self {
        let tokens = replacements
            .into_iter()
            .map(|(key, value)| (format!("##{}##", key), value))
            .collect();
        Self { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Replace every known token in `value`. Unknown tokens stay verbatim.
    pub fn apply(&self, value: &mut String) {
        for (token, replacement) in &self.tokens {
            if value.contains(token.as_str()) {
                *value = value.replace(token.as_str(), replacement);
            }
        }
    }

    pub fn apply_opt(&self, value: &mut Option<String>) {
        if let Some(v) = value {
            self.apply(v);
        }
    }

    pub fn apply_list(&self, values: &mut Option<Vec<String>>) {
        for v in values.iter_mut().flatten() {
            self.apply(v);
        }
    }
}

/// Types whose string fields take part in keyword substitution.
pub trait Substitute {
    fn substitute(&mut self, keywords: &Keywords);
}

impl<T: Substitute> Substitute for Vec<T> {
    fn substitute(&mut self, keywords: &Keywords) {
        for item in self.iter_mut() {
            item.substitute(keywords);
        }
    }
}

impl<T: Substitute> Substitute for Option<T> {
    fn substitute(&mut self, keywords: &Keywords) {
        if let Some(inner) = self {
            inner.substitute(keywords);
        }
    }
}
