use super::{UrlParams, build_url_string_from_url_params, get_url_params};

/// Browser history collaborator.
///
/// `replace_state` swaps the current entry's URL without navigating or
/// reloading the page.
pub trait History {
    fn replace_state(&mut self, href: &str);
}

/// Current page URL split into a path, its query params and fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLocation {
    path: String,
    params: UrlParams,
    fragment: Option<String>,
}

impl PageLocation {
    #[must_use]
    pub fn from_href(href: &str) -> Self {
        let path = href
            .split_once(['?', '#'])
            .map_or(href, |(path, _)| path)
            .to_owned();
        let fragment = href
            .split_once('#')
            .map(|(_, fragment)| fragment.to_owned());
        Self {
            path,
            params: get_url_params(href),
            fragment,
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn params(&self) -> &UrlParams {
        &self.params
    }

    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Full URL with params in their original order and the fragment kept.
    #[must_use]
    pub fn href(&self) -> String {
        let mut href = self.path.clone();
        if !self.params.is_empty() {
            href.push('?');
            href.push_str(&self.params.to_query());
        }
        if let Some(fragment) = &self.fragment {
            href.push('#');
            href.push_str(fragment);
        }
        href
    }

    /// Sets `key` in place and records the new URL in `history` without
    /// reloading.
    pub fn replace_param(&mut self, key: &str, value: &str, history: &mut impl History) {
        self.params.set(key, value);
        history.replace_state(&self.href());
    }

    /// URL the page would navigate to when reloaded with `params`.
    #[must_use]
    pub fn with_params(&self, params: &UrlParams) -> String {
        format!("{}{}", self.path, build_url_string_from_url_params(params))
    }
}
