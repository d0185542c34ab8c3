//! Flatten derive macro implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Fields, GenericArgument, PathArguments, Type, parse2};

/// Field options parsed from `#[form(...)]` attributes.
#[derive(Debug, Clone, Default)]
struct FormFieldOptions {
    /// Full query directive: `"<name>[,<option>...]"`.
    query: Option<String>,
    /// Generic rename, lower priority than the query directive.
    rename: Option<String>,
    /// Emit the field even when its value is zero.
    sendzero: bool,
    /// The field is a nested record, flattened under `key[...]`.
    nested: bool,
    /// The field is an embedded record, flattened without a prefix.
    inline: bool,
}

/// How a field's declared type is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    /// A scalar kind with a `FormValue` implementation.
    Scalar,
    /// A string-to-string map, one entry per sub-key.
    StringMap,
    /// A map with a non-string key or value type.
    BadMap,
    /// A nested record (`#[form(nested)]`).
    Nested,
    /// An embedded record (`#[form(inline)]`).
    Inline,
    /// Everything else; mapped to a runtime error.
    Unsupported,
}

/// Expand the `#[derive(Flatten)]` macro.
pub fn expand_flatten_derive(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Only support structs with named fields
    let fields = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Flatten derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Flatten derive only supports structs",
            ));
        }
    };

    let mut field_handlers = Vec::new();

    for field in fields {
        // Safe: we've already verified this is a struct with named fields
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let options = parse_form_field_options(field)?;

        // Determine the key: query directive > rename > lowercased identifier
        let mut sendzero = options.sendzero;
        let key = resolve_key(&field_ident.to_string(), &options, &mut sendzero);

        // The skip sentinel drops the field regardless of value.
        if key == "-" {
            continue;
        }

        let handler = generate_field_handler(field_ident, &field.ty, &key, sendzero, &options);
        field_handlers.push(handler);
    }

    Ok(quote! {
        impl #impl_generics ::formflat::Flatten for #name #ty_generics #where_clause {
            fn flatten_into(
                &self,
                params: &mut ::formflat::ParamSet,
                parent: &str,
            ) -> ::formflat::Result<()> {
                #(#field_handlers)*
                ::std::result::Result::Ok(())
            }
        }
    })
}

/// Resolve the candidate key for a field, folding any `sendzero` option
/// found in the query directive into `sendzero`.
fn resolve_key(field_name: &str, options: &FormFieldOptions, sendzero: &mut bool) -> String {
    if let Some(directive) = options.query.as_deref() {
        let mut parts = directive.split(',');
        let name = parts.next().unwrap_or_default();
        for opt in parts {
            if opt == "sendzero" {
                *sendzero = true;
            }
        }
        if !name.is_empty() {
            return name.to_string();
        }
    }
    if let Some(rename) = options.rename.as_deref() {
        return rename.to_string();
    }
    field_name.to_lowercase()
}

/// Parse field options from `#[form(...)]` attributes.
fn parse_form_field_options(field: &syn::Field) -> syn::Result<FormFieldOptions> {
    let mut options = FormFieldOptions::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("form") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("query") {
                let value: syn::LitStr = meta.value()?.parse()?;
                options.query = Some(value.value());
            } else if meta.path.is_ident("rename") {
                let value: syn::LitStr = meta.value()?.parse()?;
                options.rename = Some(value.value());
            } else if meta.path.is_ident("sendzero") {
                options.sendzero = true;
            } else if meta.path.is_ident("nested") {
                options.nested = true;
            } else if meta.path.is_ident("inline") {
                options.inline = true;
            } else {
                return Err(meta.error(
                    "unknown form attribute. Expected one of: \
                     query, rename, sendzero, nested, inline",
                ));
            }
            Ok(())
        })?;
    }

    if options.nested && options.inline {
        return Err(syn::Error::new_spanned(
            field,
            "`nested` and `inline` are mutually exclusive",
        ));
    }

    Ok(options)
}

/// Generate code for handling a single field.
fn generate_field_handler(
    field_ident: &syn::Ident,
    field_ty: &Type,
    key: &str,
    sendzero: bool,
    options: &FormFieldOptions,
) -> TokenStream {
    let field_name = field_ident.to_string();
    let inner_ty = option_inner_type(field_ty);
    let kind = if options.inline {
        FieldKind::Inline
    } else if options.nested {
        FieldKind::Nested
    } else {
        classify(inner_ty.unwrap_or(field_ty))
    };

    // An unsupported kind never touches the value: a present field is a
    // hard error, an absent optional one is simply omitted.
    if kind == FieldKind::Unsupported {
        let err = quote! {
            ::std::result::Result::<(), ::formflat::FlattenError>::Err(
                ::formflat::FlattenError::unsupported(#field_name),
            )?;
        };
        return if inner_ty.is_some() {
            quote! {
                if self.#field_ident.is_some() {
                    #err
                }
            }
        } else {
            err
        };
    }

    let body = generate_kind_handler(&field_name, key, sendzero, kind);

    if inner_ty.is_some() {
        // Option<T>: an absent value is omitted outright
        quote! {
            if let ::std::option::Option::Some(value) = &self.#field_ident {
                #body
            }
        }
    } else {
        quote! {
            {
                let value = &self.#field_ident;
                #body
            }
        }
    }
}

/// Generate the per-kind conversion code. Expects a `value` binding that
/// borrows the (already dereferenced) field value.
fn generate_kind_handler(
    field_name: &str,
    key: &str,
    sendzero: bool,
    kind: FieldKind,
) -> TokenStream {
    let resolve = quote! {
        let key = if parent.is_empty() {
            ::std::string::String::from(#key)
        } else {
            ::std::format!("{}[{}]", parent, #key)
        };
    };

    match kind {
        FieldKind::Scalar => quote! {
            if #sendzero || !::formflat::FormValue::is_zero(value) {
                let text = ::formflat::FormValue::render(value);
                if !text.is_empty() {
                    #resolve
                    params.set(key, text);
                }
            }
        },
        FieldKind::StringMap => quote! {
            if #sendzero || !value.is_empty() {
                #resolve
                let mut entries: ::std::vec::Vec<_> = value.iter().collect();
                entries.sort();
                for (map_key, map_value) in entries {
                    params.set(
                        ::std::format!("{}[{}]", key, map_key),
                        ::std::clone::Clone::clone(map_value),
                    );
                }
            }
        },
        FieldKind::BadMap => quote! {
            if #sendzero || !value.is_empty() {
                ::std::result::Result::<(), ::formflat::FlattenError>::Err(
                    ::formflat::FlattenError::map_kind(#field_name),
                )?;
            }
        },
        FieldKind::Nested => quote! {
            #resolve
            ::formflat::Flatten::flatten_into(value, params, &key)?;
        },
        FieldKind::Inline => quote! {
            ::formflat::Flatten::flatten_into(value, params, "")?;
        },
        // Handled before the value binding is generated.
        FieldKind::Unsupported => TokenStream::new(),
    }
}

/// Scalar type names with a `FormValue` implementation.
const SCALAR_TYPES: &[&str] = &[
    "bool", "i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64", "usize", "f32", "f64",
    "String", "DateTime",
];

/// Classify a (non-`Option`) field type by its syntax.
fn classify(ty: &Type) -> FieldKind {
    let Type::Path(type_path) = ty else {
        return FieldKind::Unsupported;
    };
    let Some(segment) = type_path.path.segments.last() else {
        return FieldKind::Unsupported;
    };

    let ident = segment.ident.to_string();
    if SCALAR_TYPES.contains(&ident.as_str()) {
        return FieldKind::Scalar;
    }

    if ident == "HashMap" || ident == "BTreeMap" {
        if map_args_are_strings(&segment.arguments) {
            return FieldKind::StringMap;
        }
        return FieldKind::BadMap;
    }

    FieldKind::Unsupported
}

/// Whether a map type's key and value arguments are both `String`.
fn map_args_are_strings(arguments: &PathArguments) -> bool {
    let PathArguments::AngleBracketed(args) = arguments else {
        return false;
    };
    let types: Vec<_> = args
        .args
        .iter()
        .filter_map(|arg| match arg {
            GenericArgument::Type(ty) => Some(ty),
            _ => None,
        })
        .collect();
    types.len() >= 2 && types.iter().take(2).all(|ty| is_string_type(ty))
}

/// Check if a type is `String`.
fn is_string_type(ty: &Type) -> bool {
    matches!(ty, Type::Path(type_path)
        if type_path.path.segments.last()
            .is_some_and(|seg| seg.ident == "String" && seg.arguments.is_none()))
}

/// Extract `T` from `Option<T>`, if the type is an `Option`.
fn option_inner_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}
