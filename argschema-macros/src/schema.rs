//! Schema macro implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::LitStr;

use argschema_parser::schema::entries;

pub fn run(item: TokenStream) -> TokenStream {
    try_run(item).unwrap_or_else(|err| err.to_compile_error())
}

pub fn try_run(item: TokenStream) -> Result<TokenStream, syn::Error> {
    let lit: LitStr = syn::parse2(item)?;
    let schema = lit.value();

    let mut seen = Vec::new();

    for entry in entries(&schema) {
        let (id, _) = entry.map_err(|err| syn::Error::new(lit.span(), err))?;

        // The parser keeps the last declaration at runtime, reject it here instead.
        if seen.contains(&id) {
            let msg = format!("argument `{id}` is declared more than once");
            return Err(syn::Error::new(lit.span(), msg));
        }

        seen.push(id);
    }

    Ok(quote! { #lit })
}
