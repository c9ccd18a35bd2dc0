use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_quote, Attribute, Data, DeriveInput, Error, Fields, LitStr, Result};

/// Parsed field attributes
#[derive(Default)]
struct FieldAttrs {
    tags: Vec<(String, String)>,
    embedded: bool,
}

/// Parse `#[tag(key = "value", ...)]` and `#[embed]`
fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();

    for attr in attrs {
        if attr.path().is_ident("tag") {
            attr.parse_nested_meta(|meta| {
                let key = match meta.path.get_ident() {
                    Some(ident) => ident.unraw().to_string(),
                    None => return Err(meta.error("expected a tag key such as `db`")),
                };
                let value: LitStr = meta.value()?.parse()?;
                if parsed.tags.iter().any(|(existing, _)| *existing == key) {
                    return Err(meta.error(format!("duplicate tag key `{}`", key)));
                }
                parsed.tags.push((key, value.value()));
                Ok(())
            })?;
        } else if attr.path().is_ident("embed") {
            attr.meta.require_path_only()?;
            parsed.embedded = true;
        }
    }

    Ok(parsed)
}

pub fn derive_record(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    match expand(input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let ident = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            other => {
                return Err(Error::new_spanned(
                    other,
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new_spanned(
                ident,
                "Record can only be derived for structs with named fields",
            ))
        }
    };

    let mut field_entries = Vec::with_capacity(fields.len());
    let mut value_entries = Vec::with_capacity(fields.len());

    for field in fields {
        let field_ident = field.ident.as_ref().expect("named field");
        let name = field_ident.unraw().to_string();
        let attrs = parse_field_attrs(&field.attrs)?;

        let tags = attrs.tags.iter().map(|(key, value)| quote! { (#key, #value) });
        let embedded = attrs.embedded;

        field_entries.push(quote! {
            ::namedargs::Field {
                ident: #name,
                tags: &[#(#tags),*],
                embedded: #embedded,
                value: &self.#field_ident,
            }
        });

        value_entries.push(quote! {
            (
                ::std::string::String::from(#name),
                ::namedargs::Reflect::to_value(&self.#field_ident),
            )
        });
    }

    let mut generics = input.generics.clone();
    let type_params: Vec<_> = generics.type_params().map(|param| param.ident.clone()).collect();
    if !type_params.is_empty() {
        let where_clause = generics.make_where_clause();
        for param in type_params {
            where_clause
                .predicates
                .push(parse_quote! { #param: ::namedargs::Reflect });
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::namedargs::Reflect for #ident #ty_generics #where_clause {
            fn shape(&self) -> ::namedargs::Shape<'_> {
                ::namedargs::Shape::Record(::std::vec![#(#field_entries),*])
            }

            fn to_value(&self) -> ::namedargs::Value {
                ::namedargs::Value::Record(::std::vec![#(#value_entries),*])
            }

            fn is_record_type() -> bool {
                true
            }
        }
    })
}
