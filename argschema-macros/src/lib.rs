use proc_macro::TokenStream;

mod schema;

/// Check a schema literal at compile time and expand to it as a `&'static str`.
///
/// ```ignore
/// let args: Args<'_> = Args::parse(schema!("v,o*,p#"), argv)?;
/// ```
#[proc_macro]
pub fn schema(item: TokenStream) -> TokenStream {
    schema::run(item.into()).into()
}
