//! Security key codec: parameterized cases and properties

use opthouse_core::prelude::*;
use opthouse_core::security_key::STOCK_KEY_SUFFIX;
use proptest::prelude::*;
use rstest::*;

#[rstest]
#[case("ibm", "IBM:::S")]
#[case(" Msft ", "MSFT:::S")]
#[case("brk.b", "BRKB:::S")]
#[case("ibm:20110716:1600000:c", "IBM:20110716:1600000:C")]
#[case("IBM:::s", "IBM:::S")]
#[case("ibm : 2011-07-16 : 1600000 : p", "IBM:20110716:1600000:P")]
#[case("", ":::S")]
#[case("123", ":::S")]
fn test_to_key(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(to_key(input), expected);
}

#[rstest]
#[case("ibm", "IBM")]
#[case("IBM:20110716:1600000:C", "IBM")]
#[case("spy:::s", "SPY")]
#[case("", "")]
fn test_underlying(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(underlying_of(input), expected);
}

#[rstest]
#[case("ibm", true, false)]
#[case("IBM:::S", true, false)]
#[case("IBM:20110716:1600000:C", false, true)]
#[case("IBM:20110716:1600000:P", false, true)]
#[case("IBM:X", false, false)]
fn test_classification(#[case] input: &str, #[case] stock: bool, #[case] option: bool) {
    assert_eq!(is_stock(input), stock);
    assert_eq!(is_option(input), option);
}

#[rstest]
#[case("ibm", "IBM:::s", true)]
#[case("ibm", "IBM", true)]
#[case("IBM:20110716:1600000:C", "ibm:20110716:1600000:c", true)]
#[case("IBM:20110716:1600000:C", "ibm:20110716:01600000:c", false)]
#[case("IBM", "MSFT", false)]
fn test_keys_equal(#[case] a: &str, #[case] b: &str, #[case] expected: bool) {
    assert_eq!(keys_equal(a, b), expected);
    assert_eq!(keys_equal(b, a), expected);
}

#[test]
fn test_security_key_parts() {
    let key = SecurityKey::parse("ibm:20110716:1600000:p");
    assert_eq!(key.underlying(), "IBM");
    assert_eq!(key.expiration(), "20110716");
    assert_eq!(key.strike(), 1_600_000);
    assert_eq!(key.strike_price(), Fixed::from_i64(160));
    assert_eq!(key.kind(), Some(InstrumentKind::Put));

    let built = SecurityKey::option("ibm", "20110716", 1_600_000, InstrumentKind::Put);
    assert_eq!(built, key);
    assert!(SecurityKey::stock("ibm").matches("IBM:::S"));
}

proptest! {
    #[test]
    fn test_to_key_idempotent(s in ".*") {
        let once = to_key(&s);
        prop_assert_eq!(to_key(&once), once);
    }

    #[test]
    fn test_ticker_gets_stock_suffix(t in "[a-zA-Z]{0,8}") {
        prop_assert_eq!(to_key(&t), format!("{}{}", normalize_symbol(&t), STOCK_KEY_SUFFIX));
        prop_assert!(is_stock(&t));
        prop_assert!(!is_option(&t));
    }

    #[test]
    fn test_option_keys_classify(
        sym in "[A-Z]{1,5}",
        exp in "20[0-9]{6}",
        strike in 1u64..100_000_000,
        call in any::<bool>(),
    ) {
        let flag = if call { 'C' } else { 'P' };
        let key = format!("{sym}:{exp}:{strike}:{flag}");
        prop_assert!(is_key(&key));
        prop_assert!(is_option(&key));
        prop_assert!(!is_stock(&key));
        prop_assert_eq!(underlying_of(&key), sym);
        prop_assert_eq!(normalize_key(&key.to_lowercase()), key);
    }

    #[test]
    fn test_keys_equal_is_reflexive(s in ".*") {
        prop_assert!(keys_equal(&s, &s));
    }
}
