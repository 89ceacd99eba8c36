use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Block, Expr, ItemFn};

pub fn main_attribute(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut input = parse_macro_input!(item as ItemFn);

    if attr.is_empty() {
        return syn::Error::new_spanned(
            &input.sig.ident,
            "#[app_provider::main] needs the application to install, \
             e.g. #[app_provider::main(MyApp::new())]",
        )
        .to_compile_error()
        .into();
    }

    let application = parse_macro_input!(attr as Expr);
    let body = input.block.clone();

    // Keep the original body as a nested block so its tail expression is
    // still the function's return value.
    let block: Block = syn::parse_quote!({
        ::app_provider::bootstrap(#application);
        #body
    });
    input.block = Box::new(block);

    quote! {
        #input
    }
    .into()
}
