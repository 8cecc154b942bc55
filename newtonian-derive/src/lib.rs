//! Attribute macro for `newtonian` validated calls.
//!
//! `newtonian-derive` is an implementation detail of this workspace; depend on `newtonian` and use the re-exported
//! `#[validated]` attribute.
//!
//! # Generated items
//!
//! For a free function `fn step(x: f64, n: i64) -> f64`, the attribute keeps `step` unchanged and adds:
//!
//! - `fn step_validated() -> Result<ValidatedCall, TypeCheckError>`, with the same visibility, which builds a
//!   `Signature` from `<T as Describe>::describe()` for every parameter and the return type, and wraps a body that
//!   reads each argument through `FromValue` and converts the result through `IntoValue`.
//!
//! # Attributes
//!
//! - `name = "step"`: callable name used in errors (defaults to the function name)
//! - `fallible`: the function returns `Result<T, E>` with `E: Into<TypeCheckError>`; `T` is the declared return type
//! - `path = newtonian_core`: path of the crate exposing `typecheck` (defaults to `::newtonian`)

#![deny(missing_docs)]
#![forbid(unsafe_code)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    ext::IdentExt,
    parse::{Parse, ParseStream},
    parse_macro_input, parse_quote, FnArg, GenericArgument, Ident, ItemFn, LitStr, Pat, Path,
    PathArguments, ReturnType, Token, Type,
};

/// Adds a `<fn>_validated()` constructor returning a `ValidatedCall` for the annotated function.
///
/// Parameters must be plain identifiers with owned types implementing `Describe + FromValue`; the return type must
/// implement `Describe + IntoValue`. Receivers, generics and reference parameters are rejected at compile time.
#[proc_macro_attribute]
pub fn validated(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ValidatedArgs);
    let func = parse_macro_input!(item as ItemFn);

    match validated_impl(args, func) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn validated_impl(args: ValidatedArgs, func: ItemFn) -> syn::Result<TokenStream2> {
    let sig = &func.sig;
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "generic functions cannot be validated",
        ));
    }
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "async functions cannot be validated",
        ));
    }

    let mut idents: Vec<Ident> = Vec::new();
    let mut types: Vec<Type> = Vec::new();
    for input in &sig.inputs {
        let typed = match input {
            FnArg::Receiver(receiver) => {
                return Err(syn::Error::new_spanned(
                    receiver,
                    "methods with a receiver cannot be validated; use `NativeFn::method`",
                ))
            }
            FnArg::Typed(typed) => typed,
        };
        let ident = match &*typed.pat {
            Pat::Ident(p) if p.by_ref.is_none() && p.subpat.is_none() => p.ident.clone(),
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "expected a plain identifier pattern",
                ))
            }
        };
        if let Type::Reference(r) = &*typed.ty {
            return Err(syn::Error::new_spanned(
                r,
                "reference parameters are not supported; take the value by ownership",
            ));
        }
        idents.push(ident);
        types.push((*typed.ty).clone());
    }

    let output: Type = match &sig.output {
        ReturnType::Default => parse_quote!(()),
        ReturnType::Type(_, ty) => (**ty).clone(),
    };
    let declared = if args.fallible {
        ok_type(&output)?
    } else {
        output
    };

    let fn_ident = &sig.ident;
    let vis = &func.vis;
    let root = args.path.unwrap_or_else(|| parse_quote!(::newtonian));
    let callable = args
        .name
        .map(|lit| lit.value())
        .unwrap_or_else(|| fn_ident.unraw().to_string());
    let wrapper = format_ident!("{}_validated", fn_ident.unraw());
    let doc = format!("Validated-call constructor for [`{}`].", fn_ident.unraw());
    let names: Vec<String> = idents.iter().map(|i| i.unraw().to_string()).collect();
    let indices = 0..idents.len();
    let count = idents.len();

    let call = if args.fallible {
        quote! {
            #fn_ident(#(#idents),*)
                .map_err(::core::convert::Into::<#root::typecheck::TypeCheckError>::into)?
        }
    } else {
        quote! { #fn_ident(#(#idents),*) }
    };

    Ok(quote! {
        #func

        #[doc = #doc]
        #vis fn #wrapper() -> ::core::result::Result<
            #root::typecheck::ValidatedCall,
            #root::typecheck::TypeCheckError,
        > {
            let signature = #root::typecheck::Signature::new()
                #(.param(#names, <#types as #root::typecheck::Describe>::describe()))*
                .returns(<#declared as #root::typecheck::Describe>::describe());
            let params: [&'static str; #count] = [#(#names),*];
            let callee = #root::typecheck::NativeFn::new(
                #callable,
                params,
                move |__args: &[#root::typecheck::Value]| {
                    #(
                        let #idents: #types =
                            #root::typecheck::bound_arg(#callable, __args, #indices, #names)?;
                    )*
                    ::core::result::Result::Ok(#root::typecheck::IntoValue::into_value(#call))
                },
            );
            #root::typecheck::ValidatedCall::wrap(callee, signature)
        }
    })
}

/// First generic argument of the return type's last path segment (`T` in `Result<T, E>`).
fn ok_type(ty: &Type) -> syn::Result<Type> {
    if let Type::Path(path) = ty {
        if let Some(segment) = path.path.segments.last() {
            if let PathArguments::AngleBracketed(generics) = &segment.arguments {
                if let Some(GenericArgument::Type(ok)) = generics.args.first() {
                    return Ok(ok.clone());
                }
            }
        }
    }
    Err(syn::Error::new_spanned(
        ty,
        "`fallible` functions must return `Result<T, E>`",
    ))
}

/// Parsed contents of `#[validated(...)]`.
#[derive(Default)]
struct ValidatedArgs {
    name: Option<LitStr>,
    fallible: bool,
    path: Option<Path>,
}

impl Parse for ValidatedArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = ValidatedArgs::default();

        while !input.is_empty() {
            let ident: Ident = input.call(Ident::parse_any)?;
            match ident.to_string().as_str() {
                "fallible" => args.fallible = true,
                "name" => {
                    input.parse::<Token![=]>()?;
                    args.name = Some(input.parse()?);
                }
                "path" => {
                    input.parse::<Token![=]>()?;
                    args.path = Some(input.call(Path::parse_mod_style)?);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute `{other}`"),
                    ))
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}
