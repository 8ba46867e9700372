use md5::{Digest, Md5};

/// 16-byte digest of `input` as 32 lowercase hex characters.
///
/// The provider validates `MNT_SIGNATURE` with MD5, so the algorithm is fixed.
pub fn digest16(input: &[u8]) -> String {
    hex::encode(Md5::digest(input))
}

/// Request signature over the fields the provider checks, concatenated in
/// this exact order: account id, order id, amount, currency, test-mode flag,
/// account code.
pub fn sign(
    account_id: &str,
    order_id: &str,
    amount: &str,
    currency: &str,
    test_mode: &str,
    account_code: &str,
) -> String {
    let payload = [account_id, order_id, amount, currency, test_mode, account_code].concat();
    digest16(payload.as_bytes())
}
