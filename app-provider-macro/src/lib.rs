use proc_macro::TokenStream;

mod entry;

/// Attribute macro that installs the host hook at the very top of `main`
///
/// The argument is any expression convertible into an `ApplicationHandle`.
/// It is evaluated, captured and published before the rest of `main` runs,
/// so every module can rely on `InitRegistry::global()` being fed.
///
/// Forgetting this attribute (or a manual `app_provider::bootstrap` call)
/// leaves the application handle unpublished for the whole process.
///
/// # Example
/// ```ignore
/// use app_provider::host::LocalHost;
///
/// #[app_provider::main(LocalHost::new("notes"))]
/// fn main() {
///     let app = app_provider::application().unwrap();
///     println!("running {}", app.name());
/// }
/// ```
#[proc_macro_attribute]
pub fn main(attr: TokenStream, item: TokenStream) -> TokenStream {
    entry::main_attribute(attr, item)
}
