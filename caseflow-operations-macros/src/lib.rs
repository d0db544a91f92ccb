//! Procedural macros for defining operations
//!
//! `#[operation]` implements `caseflow_operations::Operation` for a struct,
//! deriving parameter metadata from its named fields. `#[param]` is a field
//! marker read by `#[operation]`.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, Attribute, DeriveInput, Expr, Field, Ident, Lit, Meta, Token, Type,
};

/// Attribute macro for defining an operation
///
/// # Usage
///
/// ```ignore
/// #[operation(verb = "transfer", noun = "item", description = "Move an item to another lane")]
/// #[derive(Debug, Deserialize)]
/// pub struct TransferItem<F: Family> {
///     /// The item to move
///     pub item_id: ItemId,
///
///     /// Zero-based index in the target lane
///     #[param(alias = "index")]
///     pub target_index: i64,
///
///     #[param(skip)]
///     family: PhantomData<F>,
/// }
/// ```
///
/// Generic structs are supported; the generated impl carries the struct's
/// generics and where clause.
#[proc_macro_attribute]
pub fn operation(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as OperationArgs);
    let input = parse_macro_input!(item as DeriveInput);
    let emitted = strip_param_attrs(input.clone());

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let verb = &args.verb;
    let noun = &args.noun;
    let description = &args.description;

    let fields = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            syn::Fields::Named(fields) => fields.named.iter().collect::<Vec<_>>(),
            syn::Fields::Unit => Vec::new(),
            syn::Fields::Unnamed(_) => {
                return syn::Error::new_spanned(
                    &input.ident,
                    "operation macro does not support tuple structs",
                )
                .to_compile_error()
                .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(&input.ident, "operation macro only supports structs")
                .to_compile_error()
                .into()
        }
    };

    let mut param_metas = Vec::new();
    for field in fields {
        match ParamAttrs::from_attrs(&field.attrs) {
            Ok(attrs) if attrs.skip => {}
            Ok(attrs) => param_metas.push(generate_param_meta(field, &attrs)),
            Err(err) => return err.to_compile_error().into(),
        }
    }

    let num_params = param_metas.len();

    let expanded = quote! {
        #emitted

        impl #impl_generics caseflow_operations::Operation for #name #ty_generics #where_clause {
            fn verb(&self) -> &'static str {
                #verb
            }

            fn noun(&self) -> &'static str {
                #noun
            }

            fn description(&self) -> &'static str {
                #description
            }

            fn parameters(&self) -> &'static [caseflow_operations::ParamMeta] {
                static PARAMS: [caseflow_operations::ParamMeta; #num_params] = [
                    #(#param_metas),*
                ];
                &PARAMS
            }
        }
    };

    TokenStream::from(expanded)
}

/// Arguments for the #[operation(...)] attribute
struct OperationArgs {
    verb: String,
    noun: String,
    description: String,
}

impl Parse for OperationArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut verb = None;
        let mut noun = None;
        let mut description = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let value: Lit = input.parse()?;

            let value_str = match value {
                Lit::Str(s) => s.value(),
                _ => return Err(syn::Error::new_spanned(value, "expected string literal")),
            };

            match ident.to_string().as_str() {
                "verb" => verb = Some(value_str),
                "noun" => noun = Some(value_str),
                "description" => description = Some(value_str),
                other => {
                    return Err(syn::Error::new_spanned(
                        ident,
                        format!("unknown attribute: {}", other),
                    ))
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(OperationArgs {
            verb: verb.ok_or_else(|| input.error("missing 'verb' attribute"))?,
            noun: noun.ok_or_else(|| input.error("missing 'noun' attribute"))?,
            description: description
                .ok_or_else(|| input.error("missing 'description' attribute"))?,
        })
    }
}

/// Remove `#[param]` markers so the re-emitted struct carries no field-level
/// attribute macros
fn strip_param_attrs(mut input: DeriveInput) -> DeriveInput {
    if let syn::Data::Struct(data) = &mut input.data {
        for field in data.fields.iter_mut() {
            field.attrs.retain(|a| !a.path().is_ident("param"));
        }
    }
    input
}

/// Contents of a field's #[param(...)] attributes
#[derive(Default)]
struct ParamAttrs {
    skip: bool,
    aliases: Vec<String>,
}

impl ParamAttrs {
    fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();

        for attr in attrs.iter().filter(|a| a.path().is_ident("param")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    out.skip = true;
                    Ok(())
                } else if meta.path.is_ident("alias") {
                    let alias: syn::LitStr = meta.value()?.parse()?;
                    out.aliases.push(alias.value());
                    Ok(())
                } else {
                    Err(meta.error("expected `skip` or `alias = \"...\"`"))
                }
            })?;
        }

        Ok(out)
    }
}

/// Generate ParamMeta for a field
fn generate_param_meta(field: &Field, attrs: &ParamAttrs) -> proc_macro2::TokenStream {
    let name = field
        .ident
        .as_ref()
        .map(|i| i.to_string())
        .unwrap_or_default();
    let description = extract_doc_comment(&field.attrs);
    let param_type = rust_type_to_param_type(&field.ty);
    let aliases = &attrs.aliases;

    let required_call = if is_option_type(&field.ty) {
        quote! {}
    } else {
        quote! { .required() }
    };

    quote! {
        caseflow_operations::ParamMeta::new(#name)
            .description(#description)
            .param_type(#param_type)
            #required_call
            .aliases(&[#(#aliases),*])
    }
}

/// Extract doc comment from attributes
fn extract_doc_comment(attrs: &[Attribute]) -> String {
    let docs: Vec<String> = attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }
            match &attr.meta {
                Meta::NameValue(nv) => match &nv.value {
                    Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) => Some(s.value().trim().to_string()),
                    _ => None,
                },
                _ => None,
            }
        })
        .collect();

    docs.join(" ")
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(path) => path.path.segments.last(),
        _ => None,
    }
}

/// Check if type is Option<T>
fn is_option_type(ty: &Type) -> bool {
    last_segment(ty).is_some_and(|s| s.ident == "Option")
}

/// Convert Rust type to ParamType
///
/// Id newtypes (`ItemId`, `LaneId`, ...) wrap integers and are reported as such.
fn rust_type_to_param_type(ty: &Type) -> proc_macro2::TokenStream {
    let Some(segment) = last_segment(ty) else {
        return quote! { caseflow_operations::ParamType::String };
    };
    let ident = segment.ident.to_string();

    if ident == "Option" {
        if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
            if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                return rust_type_to_param_type(inner);
            }
        }
    }

    match ident.as_str() {
        "Vec" => quote! { caseflow_operations::ParamType::Array },
        "bool" => quote! { caseflow_operations::ParamType::Boolean },
        "i32" | "i64" | "u32" | "u64" | "usize" | "isize" => {
            quote! { caseflow_operations::ParamType::Integer }
        }
        s if s.ends_with("Id") => quote! { caseflow_operations::ParamType::Integer },
        "f32" | "f64" => quote! { caseflow_operations::ParamType::Number },
        _ => quote! { caseflow_operations::ParamType::String },
    }
}

/// Marker attribute for operation fields, read by `#[operation]`
#[proc_macro_attribute]
pub fn param(_attr: TokenStream, item: TokenStream) -> TokenStream {
    item
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_param_skip_and_alias() {
        let skipped: Field = parse_quote! {
            #[param(skip)]
            family: PhantomData<F>
        };
        assert!(ParamAttrs::from_attrs(&skipped.attrs).unwrap().skip);

        let aliased: Field = parse_quote! {
            #[param(alias = "index")]
            target_index: i64
        };
        let attrs = ParamAttrs::from_attrs(&aliased.attrs).unwrap();
        assert!(!attrs.skip);
        assert_eq!(attrs.aliases, vec!["index".to_string()]);
    }

    #[test]
    fn test_malformed_param_is_an_error() {
        let unknown: Field = parse_quote! {
            #[param(hidden)]
            lane_id: LaneId
        };
        assert!(ParamAttrs::from_attrs(&unknown.attrs).is_err());

        let not_a_string: Field = parse_quote! {
            #[param(alias = 3)]
            lane_id: LaneId
        };
        assert!(ParamAttrs::from_attrs(&not_a_string.attrs).is_err());
    }
}
