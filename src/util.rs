/// Checks a protocol rule that correct callers never break.
///
/// Panics in debug builds and with the `strict-protocol` feature. Otherwise the
/// violation is logged at debug level and the caller carries on with its
/// no-op path.
macro_rules! protocol_assert {
  ($cond:expr, $($arg:tt)+) => {{
    let holds: bool = $cond;
    if cfg!(any(debug_assertions, feature = "strict-protocol")) {
      assert!(holds, $($arg)+);
    } else if !holds {
      tracing::debug!($($arg)+);
    }
  }};
}

pub(crate) use protocol_assert;
