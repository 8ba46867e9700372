use std::collections::HashMap;
use std::fmt;

pub const KEY_ACCOUNT_ID: &str = "monetasdk_account_id";
pub const KEY_ACCOUNT_CODE: &str = "monetasdk_account_code";
pub const KEY_DEMO_MODE: &str = "monetasdk_demo_mode";
pub const KEY_TEST_MODE: &str = "monetasdk_test_mode";
pub const KEY_DEMO_URL: &str = "monetasdk_demo_url";
pub const KEY_PRODUCTION_URL: &str = "monetasdk_production_url";
pub const KEY_WIDGET_LINK: &str = "monetasdk_assistant_widget_link";
pub const KEY_SUCCESS_URL: &str = "monetasdk_success_url";
pub const KEY_FAIL_URL: &str = "monetasdk_fail_url";
pub const KEY_DEEP_LINK_SCHEME: &str = "monetasdk_deep_link_scheme";

/// Flat key/value configuration assembled from one or more layered stores.
///
/// Lookups never fail: a missing key reads as the empty string. Values are
/// normalized on read by dropping `"` characters and surrounding whitespace,
/// so `key = "abc"` and `key=abc` are equivalent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConfigMap {
    entries: HashMap<String, String>,
}

impl ConfigMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overrides a key. Later layers call this to shadow earlier ones.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> String {
        self.entries
            .get(key)
            .map(|raw| raw.replace('"', "").trim().to_string())
            .unwrap_or_default()
    }

    /// Overlays `other` on top of `self`.
    pub fn merge(&mut self, other: ConfigMap) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Values may hold secrets; only keys are printed.
impl fmt::Debug for ConfigMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.entries.keys().collect();
        keys.sort();
        f.debug_struct("ConfigMap").field("keys", &keys).finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ConfigMap::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

/// Shared secret appended to the signature input. Never printed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AccountCode(String);

impl AccountCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AccountCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("AccountCode(<unset>)")
        } else {
            f.write_str("AccountCode([REDACTED])")
        }
    }
}

/// Routing ids for one specific payment method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRouting {
    pub account_id: String,
    pub unit_id: String,
}

/// Typed view over the keys the request builder and interceptor consume.
#[derive(Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub account_id: String,
    pub account_code: AccountCode,
    pub demo_mode: bool,
    /// Passed through verbatim; it is part of the signature input.
    pub test_mode: String,
    pub demo_url: String,
    pub production_url: String,
    pub widget_path: String,
    pub success_url: String,
    pub fail_url: String,
    /// Private URI scheme (without `://`) that signals termination. Empty
    /// disables deep-link handling.
    pub deep_link_scheme: String,
    raw: ConfigMap,
}

impl WidgetConfig {
    pub fn from_map(map: ConfigMap) -> Self {
        Self {
            account_id: map.get(KEY_ACCOUNT_ID),
            account_code: AccountCode::new(map.get(KEY_ACCOUNT_CODE)),
            demo_mode: map.get(KEY_DEMO_MODE) == "1",
            test_mode: map.get(KEY_TEST_MODE),
            demo_url: map.get(KEY_DEMO_URL),
            production_url: map.get(KEY_PRODUCTION_URL),
            widget_path: map.get(KEY_WIDGET_LINK),
            success_url: map.get(KEY_SUCCESS_URL),
            fail_url: map.get(KEY_FAIL_URL),
            deep_link_scheme: map.get(KEY_DEEP_LINK_SCHEME),
            raw: map,
        }
    }

    /// Base endpoint (demo or production) joined with the widget path.
    pub fn endpoint(&self) -> String {
        let base = if self.demo_mode {
            &self.demo_url
        } else {
            &self.production_url
        };
        format!("{}{}", base, self.widget_path)
    }

    /// Routing ids configured for `method`, keyed `<method>_accountId` and
    /// `<method>_unitId`.
    pub fn method_routing(&self, method: &str) -> MethodRouting {
        MethodRouting {
            account_id: self.raw.get(&format!("{method}_accountId")),
            unit_id: self.raw.get(&format!("{method}_unitId")),
        }
    }
}

// The raw map still carries the account code, so it stays out of Debug.
impl fmt::Debug for WidgetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetConfig")
            .field("account_id", &self.account_id)
            .field("account_code", &self.account_code)
            .field("demo_mode", &self.demo_mode)
            .field("test_mode", &self.test_mode)
            .field("endpoint", &self.endpoint())
            .field("success_url", &self.success_url)
            .field("fail_url", &self.fail_url)
            .field("deep_link_scheme", &self.deep_link_scheme)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_empty() {
        let map = ConfigMap::new();
        assert_eq!(map.get("absent"), "");
    }

    #[test]
    fn test_get_strips_quotes_and_whitespace() {
        let mut map = ConfigMap::new();
        map.set("k", "  \"value\"  ");
        assert_eq!(map.get("k"), "value");
    }

    #[test]
    fn test_merge_overrides_earlier_layer() {
        let mut base: ConfigMap = [("a", "1"), ("b", "2")].into_iter().collect();
        let overlay: ConfigMap = [("b", "3")].into_iter().collect();
        base.merge(overlay);
        assert_eq!(base.get("a"), "1");
        assert_eq!(base.get("b"), "3");
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn test_endpoint_follows_demo_flag() {
        let mut map: ConfigMap = [
            (KEY_DEMO_URL, "https://demo.example"),
            (KEY_PRODUCTION_URL, "https://prod.example"),
            (KEY_WIDGET_LINK, "/widget"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            WidgetConfig::from_map(map.clone()).endpoint(),
            "https://prod.example/widget"
        );

        map.set(KEY_DEMO_MODE, "1");
        assert_eq!(
            WidgetConfig::from_map(map).endpoint(),
            "https://demo.example/widget"
        );
    }

    #[test]
    fn test_method_routing_lookup() {
        let map: ConfigMap = [("plastic_accountId", "111"), ("plastic_unitId", "222")]
            .into_iter()
            .collect();
        let config = WidgetConfig::from_map(map);

        let routing = config.method_routing("plastic");
        assert_eq!(routing.account_id, "111");
        assert_eq!(routing.unit_id, "222");
        assert_eq!(config.method_routing("sbp").unit_id, "");
    }

    #[test]
    fn test_account_code_is_redacted() {
        let code = AccountCode::new("hunter2");
        let printed = format!("{:?}", code);
        assert!(!printed.contains("hunter2"));
        assert_eq!(code.expose(), "hunter2");
    }

    #[test]
    fn test_widget_config_debug_hides_account_code() {
        let map: ConfigMap = [(KEY_ACCOUNT_CODE, "hunter2"), (KEY_ACCOUNT_ID, "42")]
            .into_iter()
            .collect();
        let printed = format!("{:?}", WidgetConfig::from_map(map));
        assert!(printed.contains("42"));
        assert!(!printed.contains("hunter2"));
    }
}
