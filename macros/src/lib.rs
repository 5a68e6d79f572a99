use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, Ident, ItemFn, LitStr};

/// Test attribute used across rxstreams.
///
/// - `#[rxstreams_macro::test]` runs as `#[test]` natively and as
///   `wasm_bindgen_test` on wasm32.
/// - `#[rxstreams_macro::test(violation)]` marks a test that expects a protocol
///   assertion to fire. It is compiled only where those assertions are active
///   (debug builds or the `strict-protocol` feature) and never on wasm32, where
///   panics abort.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
  let input = parse_macro_input!(item as ItemFn);

  if let Some(asyncness) = input.sig.asyncness {
    return TokenStream::from(
      syn::Error::new(
        asyncness.span(),
        "rxstreams_macro::test does not run async tests; rxstreams has no runtime",
      )
      .to_compile_error(),
    );
  }

  let raw_args = proc_macro2::TokenStream::from(attr);
  let violation = if raw_args.is_empty() {
    false
  } else {
    let arg = if let Ok(ident) = syn::parse2::<Ident>(raw_args.clone()) {
      Some((ident.to_string(), ident.span()))
    } else if let Ok(lit) = syn::parse2::<LitStr>(raw_args.clone()) {
      Some((lit.value(), lit.span()))
    } else {
      None
    };
    match arg {
      Some((name, _)) if name == "violation" => true,
      Some((_, span)) => {
        return TokenStream::from(
          syn::Error::new(
            span,
            "rxstreams_macro::test only accepts: #[rxstreams_macro::test] or \
             #[rxstreams_macro::test(violation)]",
          )
          .to_compile_error(),
        );
      }
      None => {
        return TokenStream::from(
          syn::Error::new(
            raw_args.span(),
            "rxstreams_macro::test only accepts an identifier or string argument",
          )
          .to_compile_error(),
        );
      }
    }
  };

  let expanded = if violation {
    quote! {
        #[cfg(all(
          not(target_arch = "wasm32"),
          any(debug_assertions, feature = "strict-protocol")
        ))]
        #[test]
        #[should_panic]
        #input
    }
  } else {
    quote! {
        #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
        #[cfg_attr(not(target_arch = "wasm32"), test)]
        #input
    }
  };

  TokenStream::from(expanded)
}
