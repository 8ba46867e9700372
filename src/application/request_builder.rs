use super::signature::sign;
use crate::domain::amount::Amount;
use crate::domain::config::WidgetConfig;
use crate::domain::payment::PaymentMethod;
use crate::error::{PaymentError, Result};
use url::Url;
use url::form_urlencoded::byte_serialize;

/// Builds the provider form URL for one payment attempt.
///
/// The only fatal condition is an endpoint that does not parse as an absolute
/// URL; in that case no partial URL is produced. Empty redirect targets are
/// left out; any other value is passed through form-encoded.
pub fn build_payment_url(
    order_id: &str,
    amount: &Amount,
    currency: &str,
    method: &PaymentMethod,
    config: &WidgetConfig,
) -> Result<String> {
    let endpoint = config.endpoint();
    let mut url = Url::parse(&endpoint).map_err(|e| {
        PaymentError::ConfigError(format!("invalid form endpoint '{}': {}", endpoint, e))
    })?;
    let amount = amount.to_wire();

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("MNT_ID", &config.account_id)
            .append_pair("MNT_TRANSACTION_ID", order_id)
            .append_pair("MNT_CURRENCY_CODE", currency)
            .append_pair("MNT_AMOUNT", &amount)
            .append_pair("followup", "true")
            .append_pair("javascriptEnabled", "true")
            .append_pair("MNT_TEST_MODE", &config.test_mode);

        if let PaymentMethod::Specific(name) = method {
            let routing = config.method_routing(name);
            if !routing.unit_id.is_empty() {
                query
                    .append_pair("payment_method", name)
                    .append_pair("paymentSystem.unitId", &routing.unit_id)
                    .append_pair("paymentSystem.limitIds", &routing.unit_id)
                    .append_pair("paymentSystem.accountId", &routing.account_id);
            }
        }
    }

    let mut serialized = url.to_string();
    for (name, target) in [
        ("MNT_SUCCESS_URL", &config.success_url),
        ("MNT_FAIL_URL", &config.fail_url),
    ] {
        if target.is_empty() {
            continue;
        }
        serialized.push('&');
        serialized.push_str(name);
        serialized.push('=');
        serialized.push_str(&encode_redirect_target(target));
    }

    if !config.account_code.is_empty() {
        let signature = sign(
            &config.account_id,
            order_id,
            &amount,
            currency,
            &config.test_mode,
            config.account_code.expose(),
        );
        serialized.push_str("&MNT_SIGNATURE=");
        serialized.push_str(&signature);
    }

    tracing::debug!(order_id, url = %serialized, "Built payment URL");
    Ok(serialized)
}

/// Form-encodes a redirect target as UTF-8. The value is not validated:
/// relative paths and custom schemes are the provider's business.
pub fn encode_redirect_target(target: &str) -> String {
    byte_serialize(target.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::signature::digest16;
    use crate::domain::config::{self, ConfigMap};
    use rust_decimal_macros::dec;

    fn config_with(extra: &[(&str, &str)]) -> WidgetConfig {
        let mut map: ConfigMap = [
            (config::KEY_ACCOUNT_ID, "1234"),
            (config::KEY_TEST_MODE, "0"),
            (config::KEY_DEMO_URL, "https://demo.moneta.ru"),
            (config::KEY_PRODUCTION_URL, "https://www.payanyway.ru"),
            (config::KEY_WIDGET_LINK, "/assistant.widget"),
        ]
        .into_iter()
        .collect();
        for (key, value) in extra {
            map.set(*key, *value);
        }
        WidgetConfig::from_map(map)
    }

    fn build(config: &WidgetConfig, method: &PaymentMethod) -> String {
        build_payment_url("42", &Amount::new(dec!(199)), "RUB", method, config).unwrap()
    }

    #[test]
    fn test_base_query_parameters_in_order() {
        let url = build(&config_with(&[]), &PaymentMethod::All);
        assert_eq!(
            url,
            "https://www.payanyway.ru/assistant.widget?MNT_ID=1234&MNT_TRANSACTION_ID=42\
             &MNT_CURRENCY_CODE=RUB&MNT_AMOUNT=199.00&followup=true&javascriptEnabled=true\
             &MNT_TEST_MODE=0"
        );
    }

    #[test]
    fn test_demo_mode_selects_demo_endpoint() {
        let url = build(&config_with(&[(config::KEY_DEMO_MODE, "1")]), &PaymentMethod::All);
        assert!(url.starts_with("https://demo.moneta.ru/assistant.widget?"));
    }

    #[test]
    fn test_specific_method_appends_routing() {
        let config = config_with(&[("plastic_unitId", "777"), ("plastic_accountId", "888")]);
        let url = build(&config, &PaymentMethod::parse("plastic"));
        assert!(url.ends_with(
            "&payment_method=plastic&paymentSystem.unitId=777\
             &paymentSystem.limitIds=777&paymentSystem.accountId=888"
        ));
    }

    #[test]
    fn test_specific_method_without_unit_id_is_ignored() {
        let config = config_with(&[("plastic_accountId", "888")]);
        let url = build(&config, &PaymentMethod::parse("plastic"));
        assert!(!url.contains("payment_method"));
        assert!(!url.contains("paymentSystem"));
    }

    #[test]
    fn test_all_methods_never_routes() {
        let config = config_with(&[("all_unitId", "777")]);
        let url = build(&config, &PaymentMethod::All);
        assert!(!url.contains("payment_method"));
    }

    #[test]
    fn test_redirect_targets_are_encoded() {
        let config = config_with(&[
            (config::KEY_SUCCESS_URL, "myapp://payment/success"),
            (config::KEY_FAIL_URL, "https://app.example/fail?x=1"),
        ]);
        let url = build(&config, &PaymentMethod::All);
        assert!(url.contains("&MNT_SUCCESS_URL=myapp%3A%2F%2Fpayment%2Fsuccess"));
        assert!(url.contains("&MNT_FAIL_URL=https%3A%2F%2Fapp.example%2Ffail%3Fx%3D1"));
    }

    #[test]
    fn test_relative_redirect_target_is_kept() {
        let config = config_with(&[
            (config::KEY_SUCCESS_URL, "/payment/success"),
            (config::KEY_FAIL_URL, "https://app.example/fail"),
        ]);
        let url = build(&config, &PaymentMethod::All);
        assert!(url.contains("&MNT_SUCCESS_URL=%2Fpayment%2Fsuccess&MNT_FAIL_URL="));
    }

    #[test]
    fn test_empty_redirect_target_is_omitted() {
        let config = config_with(&[(config::KEY_FAIL_URL, "https://app.example/fail")]);
        let url = build(&config, &PaymentMethod::All);
        assert!(!url.contains("MNT_SUCCESS_URL"));
        assert!(url.ends_with("&MNT_FAIL_URL=https%3A%2F%2Fapp.example%2Ffail"));
    }

    #[test]
    fn test_signature_appended_when_account_code_set() {
        let config = config_with(&[(config::KEY_ACCOUNT_CODE, "secret")]);
        let url = build(&config, &PaymentMethod::All);
        let expected = digest16(b"123442199.00RUB0secret");
        assert!(url.ends_with(&format!("&MNT_SIGNATURE={}", expected)));
        assert!(!url.contains("secret"));
    }

    #[test]
    fn test_no_signature_without_account_code() {
        let url = build(&config_with(&[]), &PaymentMethod::All);
        assert!(!url.contains("MNT_SIGNATURE"));
    }

    #[test]
    fn test_missing_endpoint_is_config_error() {
        let config = WidgetConfig::from_map(ConfigMap::new());
        let result = build_payment_url(
            "42",
            &Amount::new(dec!(1)),
            "RUB",
            &PaymentMethod::All,
            &config,
        );
        assert!(matches!(result, Err(PaymentError::ConfigError(_))));
    }

    #[test]
    fn test_encode_redirect_target_accepts_any_value() {
        assert_eq!(encode_redirect_target("/relative/path"), "%2Frelative%2Fpath");
        assert_eq!(encode_redirect_target("not a url"), "not+a+url");
        assert_eq!(encode_redirect_target("https://a.b/c d"), "https%3A%2F%2Fa.b%2Fc+d");
        assert_eq!(encode_redirect_target("ok/успех"), "ok%2F%D1%83%D1%81%D0%BF%D0%B5%D1%85");
    }
}
