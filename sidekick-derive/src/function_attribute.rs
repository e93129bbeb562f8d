//! Implementation of the `#[function]` attribute macro.
//!
//! This module turns a typed Rust `fn` into a zero-argument function of the
//! same name returning a `sidekick::Func`.
//!
//! # Generated Code Structure
//!
//! For
//!
//! ```text
//! /// Adds two numbers.
//! #[function]
//! pub fn add(x: i64, #[default(1)] y: i64) -> i64 { x + y }
//! ```
//!
//! the macro generates:
//!
//! ```text
//! /// Adds two numbers.
//! pub fn add() -> ::sidekick::Func {
//!     fn add(x: i64, y: i64) -> i64 { x + y }
//!
//!     let signature = ::sidekick::Signature::new()
//!         .parameter("x")
//!         .parameter_with_default("y", 1);
//!     ::sidekick::Func::new(
//!         ::sidekick::NativeFunction::with_parameters("add", signature, |mut bound| {
//!             let x: i64 = ::sidekick::FromValue::from_value(bound.take(0usize))?;
//!             let y: i64 = ::sidekick::FromValue::from_value(bound.take(1usize))?;
//!             Ok(::sidekick::Value::from(add(x, y)))
//!         })
//!         .with_module(::core::module_path!())
//!         .with_doc("Adds two numbers.")
//!         .with_annotation("x", "i64")
//!         .with_annotation("y", "i64")
//!         .with_annotation("return", "i64"),
//!     )
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{ToTokens, quote};
use syn::spanned::Spanned;
use syn::{
    Attribute, Expr, ExprLit, FnArg, Ident, ItemFn, Lit, Meta, Pat, ReturnType, Signature, Type,
};

struct ParameterSpec {
    identifier: Ident,
    parameter_type: Box<Type>,
    default: Option<Expr>,
}

pub fn function_impl(attribute: TokenStream, item: TokenStream) -> TokenStream {
    let expanded = match expand(attribute.into(), item.into()) {
        Ok(tokens) => tokens,
        Err(error) => error.to_compile_error(),
    };

    TokenStream::from(expanded)
}

fn expand(attribute: TokenStream2, item: TokenStream2) -> syn::Result<TokenStream2> {
    if !attribute.is_empty() {
        return Err(syn::Error::new_spanned(
            attribute,
            "#[function] does not take arguments",
        ));
    }

    let mut function: ItemFn = syn::parse2(item)?;
    validate_signature(&function.sig)?;
    let parameters = collect_parameters(&mut function.sig)?;

    let (doc_attributes, other_attributes): (Vec<Attribute>, Vec<Attribute>) = function
        .attrs
        .iter()
        .cloned()
        .partition(|attribute| attribute.path().is_ident("doc"));
    let doc = doc_text(&doc_attributes);

    let visibility = &function.vis;
    let signature = &function.sig;
    let block = &function.block;
    let name = &signature.ident;
    let name_text = name.to_string();

    let signature_steps = parameters.iter().map(|parameter| {
        let parameter_name = parameter.identifier.to_string();
        match &parameter.default {
            Some(default) => quote! { .parameter_with_default(#parameter_name, #default) },
            None => quote! { .parameter(#parameter_name) },
        }
    });

    // Mixed-site hygiene keeps user parameters from shadowing the bound arguments.
    let bound = Ident::new("bound", Span::mixed_site());
    let conversions = parameters.iter().enumerate().map(|(index, parameter)| {
        let identifier = &parameter.identifier;
        let parameter_type = &parameter.parameter_type;
        quote! {
            let #identifier: #parameter_type =
                ::sidekick::FromValue::from_value(#bound.take(#index))?;
        }
    });

    let identifiers: Vec<&Ident> = parameters
        .iter()
        .map(|parameter| &parameter.identifier)
        .collect();

    let invocation = if returns_result(&signature.output) {
        quote! {
            #name(#(#identifiers),*)
                .map(::sidekick::Value::from)
                .map_err(::sidekick::CallError::from)
        }
    } else {
        quote! {
            ::core::result::Result::Ok(::sidekick::Value::from(#name(#(#identifiers),*)))
        }
    };

    let bound_parameter = if parameters.is_empty() {
        quote! { _bound: ::sidekick::BoundArguments }
    } else {
        quote! { mut #bound: ::sidekick::BoundArguments }
    };

    let doc_step = doc.map(|text| quote! { .with_doc(#text) });

    let annotation_steps = parameters
        .iter()
        .map(|parameter| {
            let parameter_name = parameter.identifier.to_string();
            let annotation = type_text(&parameter.parameter_type);
            quote! { .with_annotation(#parameter_name, #annotation) }
        })
        .chain(std::iter::once({
            let annotation = match &signature.output {
                ReturnType::Default => "()".to_string(),
                ReturnType::Type(_, return_type) => type_text(return_type),
            };
            quote! { .with_annotation("return", #annotation) }
        }));

    Ok(quote! {
        #(#doc_attributes)*
        #visibility fn #name() -> ::sidekick::Func {
            #(#other_attributes)*
            #signature #block

            let signature = ::sidekick::Signature::new() #(#signature_steps)*;
            ::sidekick::Func::new(
                ::sidekick::NativeFunction::with_parameters(
                    #name_text,
                    signature,
                    |#bound_parameter| {
                        #(#conversions)*
                        #invocation
                    },
                )
                .with_module(::core::module_path!())
                #doc_step
                #(#annotation_steps)*
            )
        }
    })
}

fn validate_signature(signature: &Signature) -> syn::Result<()> {
    if let Some(asyncness) = &signature.asyncness {
        return Err(syn::Error::new(
            asyncness.span(),
            "#[function] does not support async functions",
        ));
    }
    if let Some(unsafety) = &signature.unsafety {
        return Err(syn::Error::new(
            unsafety.span(),
            "#[function] does not support unsafe functions",
        ));
    }
    if let Some(abi) = &signature.abi {
        return Err(syn::Error::new(
            abi.span(),
            "#[function] does not support extern functions",
        ));
    }
    if !signature.generics.params.is_empty() || signature.generics.where_clause.is_some() {
        return Err(syn::Error::new(
            signature.generics.span(),
            "#[function] does not support generic functions",
        ));
    }
    if let Some(variadic) = &signature.variadic {
        return Err(syn::Error::new(
            variadic.span(),
            "#[function] does not support C-variadic functions",
        ));
    }
    Ok(())
}

/// Reads the parameters and strips their `#[default(...)]` attributes.
fn collect_parameters(signature: &mut Signature) -> syn::Result<Vec<ParameterSpec>> {
    signature
        .inputs
        .iter_mut()
        .map(|input| match input {
            FnArg::Receiver(receiver) => Err(syn::Error::new(
                receiver.span(),
                "#[function] does not support methods; use a free function",
            )),
            FnArg::Typed(typed) => {
                let identifier = match &*typed.pat {
                    Pat::Ident(pattern) if pattern.by_ref.is_none() && pattern.subpat.is_none() => {
                        pattern.ident.clone()
                    }
                    other => {
                        return Err(syn::Error::new(
                            other.span(),
                            "#[function] parameters must be plain identifiers",
                        ));
                    }
                };

                let mut default = None;
                let mut kept = Vec::with_capacity(typed.attrs.len());
                for attribute in typed.attrs.drain(..) {
                    if attribute.path().is_ident("default") {
                        if default.is_some() {
                            return Err(syn::Error::new(
                                attribute.span(),
                                "duplicate #[default] attribute",
                            ));
                        }
                        default = Some(attribute.parse_args::<Expr>()?);
                    } else {
                        kept.push(attribute);
                    }
                }
                typed.attrs = kept;

                Ok(ParameterSpec {
                    identifier,
                    parameter_type: typed.ty.clone(),
                    default,
                })
            }
        })
        .collect()
}

/// Joins `///` lines, dropping the single leading space rustdoc adds.
fn doc_text(attributes: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attributes
        .iter()
        .filter_map(|attribute| match &attribute.meta {
            Meta::NameValue(name_value) => match &name_value.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(text),
                    ..
                }) => Some(text.value()),
                _ => None,
            },
            _ => None,
        })
        .map(|line| line.strip_prefix(' ').map_or_else(|| line.clone(), str::to_string))
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n").trim().to_string())
    }
}

fn returns_result(output: &ReturnType) -> bool {
    match output {
        ReturnType::Type(_, return_type) => match &**return_type {
            Type::Path(path) => path
                .path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == "Result"),
            _ => false,
        },
        ReturnType::Default => false,
    }
}

fn type_text(parameter_type: &Type) -> String {
    parameter_type
        .to_token_stream()
        .to_string()
        .replace(' ', "")
}
