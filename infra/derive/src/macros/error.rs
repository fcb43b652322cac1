use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Attribute, Data, DeriveInput, Field, Fields, GenericArgument, Ident, PathArguments,
    PathSegment, Type, Variant,
};

/// One enum variant as seen by `#[vars_error]`.
struct ErrorVariant<'a> {
    ident: &'a Ident,
    source: Option<&'a Field>,
    has_context: bool,
    field_count: usize,
    cfg_attrs: Vec<&'a Attribute>,
}

impl<'a> ErrorVariant<'a> {
    fn parse(variant: &'a Variant) -> syn::Result<Self> {
        let Fields::Named(fields) = &variant.fields else {
            return Err(syn::Error::new_spanned(
                variant,
                "vars_error requires named fields for source/context handling",
            ));
        };

        let context = fields.named.iter().find(|f| f.ident.as_ref().is_some_and(|i| i == "context"));
        if let Some(field) = context
            && !is_context_type(&field.ty)
        {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "context field must be Option<Cow<'static, str>>",
            ));
        }

        let source = fields.named.iter().find(|f| is_source(f));
        if source.is_some() && context.is_none() {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                "vars_error requires `context: Option<Cow<'static, str>>` for variants with a source",
            ));
        }

        Ok(Self {
            ident: &variant.ident,
            source,
            has_context: context.is_some(),
            field_count: fields.named.len(),
            cfg_attrs: variant.attrs.iter().filter(|a| a.path().is_ident("cfg")).collect(),
        })
    }

    /// A variant gets `From<Source>` only when the source and its context are all it holds.
    fn converts(&self) -> bool {
        self.source.is_some_and(|f| !has_attr(f, "from")) && self.field_count == 2
    }
}

pub fn expand(input: DeriveInput) -> TokenStream {
    expand_enum(&input).unwrap_or_else(syn::Error::into_compile_error)
}

fn expand_enum(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(&input.ident, "vars_error can only be applied to enums"));
    };

    let variants =
        data.variants.iter().map(ErrorVariant::parse).collect::<syn::Result<Vec<_>>>()?;
    ensure_unique_sources(&variants)?;

    let name = &input.ident;
    let vis = &input.vis;
    let ext = format_ident!("{}Ext", name);
    let derives = missing_derives(input);

    let context_arms = variants.iter().filter(|v| v.has_context).map(|v| {
        let ident = v.ident;
        let cfg_attrs = &v.cfg_attrs;
        quote! { #(#cfg_attrs)* #name::#ident { context: slot, .. } => *slot = Some(label.into()), }
    });

    let conversions = variants.iter().filter(|v| v.converts()).filter_map(|v| {
        let field = v.source?;
        let field_name = field.ident.as_ref()?;
        let ty = &field.ty;
        let ident = v.ident;
        let cfg_attrs = &v.cfg_attrs;

        Some(quote! {
            #(#cfg_attrs)*
            #[automatically_derived]
            impl ::core::convert::From<#ty> for #name {
                #[inline]
                fn from(#field_name: #ty) -> Self {
                    Self::#ident { #field_name, context: None }
                }
            }

            #(#cfg_attrs)*
            #[automatically_derived]
            impl<T> #ext<T> for ::std::result::Result<T, #ty> {
                #[inline]
                fn context(
                    self,
                    label: impl Into<::std::borrow::Cow<'static, str>>,
                ) -> ::std::result::Result<T, #name> {
                    self.map_err(|#field_name| #name::#ident {
                        #field_name,
                        context: Some(label.into()),
                    })
                }
            }
        })
    });

    Ok(quote! {
        #[allow(non_shorthand_field_patterns)]
        #derives
        #input

        #vis type Result<T, E = #name> = ::std::result::Result<T, E>;

        #vis trait #ext<T> {
            /// Attaches a human-readable label describing what was being attempted.
            fn context(
                self,
                label: impl Into<::std::borrow::Cow<'static, str>>,
            ) -> ::std::result::Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for ::std::result::Result<T, #name> {
            #[inline]
            #[allow(unused_variables)]
            fn context(self, label: impl Into<::std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut err| {
                    match &mut err {
                        #( #context_arms )*
                        #[allow(unreachable_patterns)]
                        _ => {}
                    }
                    err
                })
            }
        }

        #(#conversions)*

        #[allow(dead_code, clippy::ref_option)]
        fn format_context(
            context: &::core::option::Option<::std::borrow::Cow<'static, str>>,
        ) -> ::std::borrow::Cow<'static, str> {
            context.as_ref().map_or(::std::borrow::Cow::Borrowed(""), |c| {
                ::std::borrow::Cow::Owned(format!(" ({c})"))
            })
        }
    })
}

fn ensure_unique_sources(variants: &[ErrorVariant<'_>]) -> syn::Result<()> {
    let mut seen = FxHashSet::default();
    for field in variants.iter().filter(|v| v.converts()).filter_map(|v| v.source) {
        let ty = &field.ty;
        if !seen.insert(quote!(#ty).to_string()) {
            return Err(syn::Error::new_spanned(
                ty,
                "source type is wrapped by more than one convertible variant",
            ));
        }
    }
    Ok(())
}

fn missing_derives(input: &DeriveInput) -> TokenStream {
    let mut derived = FxHashSet::default();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(segment) = meta.path.segments.last() {
                derived.insert(segment.ident.to_string());
            }
            Ok(())
        });
    }

    let mut tokens = Vec::new();
    if !derived.contains("Debug") {
        tokens.push(quote! { Debug });
    }
    if !derived.contains("Error") {
        tokens.push(quote! { ::thiserror::Error });
    }

    if tokens.is_empty() { quote! {} } else { quote! { #[derive(#(#tokens),*)] } }
}

fn is_source(field: &Field) -> bool {
    field.ident.as_ref().is_some_and(|i| i == "source")
        || has_attr(field, "source")
        || has_attr(field, "from")
}

fn has_attr(field: &Field, name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(name))
}

fn last_segment(ty: &Type) -> Option<&PathSegment> {
    let Type::Path(path) = ty else {
        return None;
    };
    path.path.segments.last()
}

fn generic_args(segment: &PathSegment) -> impl Iterator<Item = &GenericArgument> {
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => Some(args.args.iter()),
        _ => None,
    }
    .into_iter()
    .flatten()
}

fn is_context_type(ty: &Type) -> bool {
    let Some(option) = last_segment(ty).filter(|s| s.ident == "Option") else {
        return false;
    };
    let Some(GenericArgument::Type(inner)) = generic_args(option).next() else {
        return false;
    };
    let Some(cow) = last_segment(inner).filter(|s| s.ident == "Cow") else {
        return false;
    };

    let mut args = generic_args(cow);
    matches!(args.next(), Some(GenericArgument::Lifetime(lt)) if lt.ident == "static")
        && matches!(
            args.next(),
            Some(GenericArgument::Type(s)) if last_segment(s).is_some_and(|seg| seg.ident == "str")
        )
}
