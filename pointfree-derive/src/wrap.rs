//! Implementation of the `#[partial]` and `#[pointfree]` attributes.
//!
//! # Supported Input
//!
//! A free function with owned, identifier-bound parameters:
//!
//! ```text
//! #[pointfree]
//! fn render(
//!     template: String,
//!     #[default(2)] indent: i64,
//!     #[rest] parts: Vec<String>,
//!     #[keyword_only] style: String,
//!     #[keywords] options: Keywords,
//! ) -> String { ... }
//! ```
//!
//! Parameters must appear in the order positional, rest, keyword-only,
//! keyword-rest. Generic, async, const and unsafe signatures are rejected,
//! and so are `&mut self` and typed (`self: Box<Self>`) receivers.
//!
//! # Generated Code Structure
//!
//! The function is replaced by a constructor of the same name that returns
//! the wrapped function. The original body moves into an inner function and
//! the wrapper is built once:
//!
//! ```text
//! fn render() -> ::pointfree::Pointfree {
//!     fn __pointfree_body(template: String, indent: i64, ...) -> String { ... }
//!
//!     static WRAPPED: LazyLock<::pointfree::Pointfree> = LazyLock::new(|| {
//!         let signature = ::pointfree::Signature::builder("render")
//!             .positional("template")
//!             .optional("indent", 2)
//!             ...
//!             .build()
//!             .expect(..);
//!         ::pointfree::Pointfree::define(signature, |__pointfree_frame| {
//!             let template: String = __pointfree_frame.argument::<String>("template")?;
//!             ...
//!             Ok(::pointfree::IntoValue::into_value(__pointfree_body(template, ...)))
//!         })
//!     });
//!     Clone::clone(&*WRAPPED)
//! }
//! ```
//!
//! A method taking `&self` or `self` keeps its body as a hidden associated
//! function and gets a constructor that binds a clone of the receiver:
//!
//! ```text
//! fn scale(&self) -> ::pointfree::Pointfree {
//!     let signature = ::pointfree::Signature::builder("scale")
//!         .positional("x")
//!         .build()
//!         .expect(..);
//!     let __pointfree_self = Clone::clone(self);
//!     ::pointfree::Pointfree::define(signature, move |__pointfree_frame| {
//!         let x: i64 = __pointfree_frame.argument::<i64>("x")?;
//!         Ok(::pointfree::IntoValue::into_value(
//!             Self::__pointfree_scale(&__pointfree_self, x),
//!         ))
//!     })
//! }
//!
//! #[doc(hidden)]
//! fn __pointfree_scale(&self, x: i64) -> i64 { ... }
//! ```

use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::{
    Attribute, Expr, FnArg, Ident, ItemFn, LitStr, Pat, Receiver, ReturnType, Signature, Type,
};

/// Which engine the generated constructor returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrapper {
    Partial,
    Pointfree,
}

impl Wrapper {
    const fn attribute(self) -> &'static str {
        match self {
            Self::Partial => "#[partial]",
            Self::Pointfree => "#[pointfree]",
        }
    }

    fn path(self) -> TokenStream2 {
        match self {
            Self::Partial => quote! { ::pointfree::Partial },
            Self::Pointfree => quote! { ::pointfree::Pointfree },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Kind {
    Positional,
    Rest,
    KeywordOnly,
    Keywords,
}

impl Kind {
    const fn describe(self) -> &'static str {
        match self {
            Self::Positional => "positional parameter",
            Self::Rest => "#[rest] parameter",
            Self::KeywordOnly => "#[keyword_only] parameter",
            Self::Keywords => "#[keywords] parameter",
        }
    }
}

struct Parameter {
    attributes: Vec<Attribute>,
    mutability: Option<syn::token::Mut>,
    name: Ident,
    ty: Type,
    kind: Kind,
    default: Option<Expr>,
}

impl Parameter {
    fn literal(&self) -> LitStr {
        LitStr::new(&self.name.to_string(), self.name.span())
    }
}

/// How a method's receiver reaches the hidden body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelfBinding {
    Borrowed,
    Owned,
}

pub fn wrap_impl(attribute: TokenStream2, item: TokenStream2, wrapper: Wrapper) -> TokenStream2 {
    expand(attribute, item, wrapper).unwrap_or_else(|error| error.to_compile_error())
}

fn expand(attribute: TokenStream2, item: TokenStream2, wrapper: Wrapper) -> syn::Result<TokenStream2> {
    if !attribute.is_empty() {
        return Err(syn::Error::new(
            attribute.span(),
            format!("{} takes no arguments", wrapper.attribute()),
        ));
    }

    let function: ItemFn = syn::parse2(item)?;
    validate_signature(&function.sig, wrapper)?;
    let receiver = parse_receiver(&function.sig, wrapper)?;
    let parameters = parse_parameters(&function.sig, wrapper)?;

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = function;
    let name = &sig.ident;
    let name_literal = LitStr::new(&name.to_string(), name.span());
    let output = &sig.output;
    let wrapper_path = wrapper.path();
    let frame = format_ident!("__pointfree_frame");

    let inner_parameters: Vec<TokenStream2> = parameters
        .iter()
        .map(|parameter| {
            let Parameter {
                attributes,
                mutability,
                name,
                ty,
                ..
            } = parameter;
            quote! { #(#attributes)* #mutability #name: #ty }
        })
        .collect();

    let builder_calls: Vec<TokenStream2> = parameters
        .iter()
        .map(|parameter| {
            let literal = parameter.literal();
            match (parameter.kind, &parameter.default) {
                (Kind::Positional, None) => quote! { .positional(#literal) },
                (Kind::Positional, Some(default)) => quote! { .optional(#literal, #default) },
                (Kind::Rest, _) => quote! { .rest(#literal) },
                (Kind::KeywordOnly, None) => quote! { .keyword_only(#literal) },
                (Kind::KeywordOnly, Some(default)) => {
                    quote! { .keyword_only_optional(#literal, #default) }
                }
                (Kind::Keywords, _) => quote! { .keywords(#literal) },
            }
        })
        .collect();

    let extractions: Vec<TokenStream2> = parameters
        .iter()
        .map(|parameter| {
            let Parameter { name, ty, kind, .. } = parameter;
            let literal = parameter.literal();
            let read = match kind {
                Kind::Positional | Kind::KeywordOnly => {
                    quote! { #frame.argument::<#ty>(#literal)? }
                }
                Kind::Rest => quote! { #frame.rest::<#ty>()? },
                Kind::Keywords => quote! { #frame.keywords::<#ty>()? },
            };
            quote! { let #name: #ty = #read; }
        })
        .collect();

    let argument_names: Vec<&Ident> = parameters.iter().map(|parameter| &parameter.name).collect();
    let this = format_ident!("__pointfree_self");
    let hidden = format_ident!("__pointfree_{}", name);
    let call = match &receiver {
        None => quote! { __pointfree_body(#(#argument_names),*) },
        Some((_, SelfBinding::Borrowed)) => quote! { Self::#hidden(&#this, #(#argument_names),*) },
        Some((_, SelfBinding::Owned)) => quote! {
            Self::#hidden(::std::clone::Clone::clone(&#this), #(#argument_names),*)
        },
    };
    let invoke = match output {
        ReturnType::Default => quote! {
            #call;
            ::std::result::Result::Ok(::pointfree::Value::Unit)
        },
        ReturnType::Type(_, ty) if returns_result(ty) => quote! {
            #call
                .map(::pointfree::IntoValue::into_value)
                .map_err(::std::convert::Into::into)
        },
        ReturnType::Type(..) => quote! {
            ::std::result::Result::Ok(::pointfree::IntoValue::into_value(#call))
        },
    };

    let expectation = LitStr::new(
        &format!("parameter list validated by {}", wrapper.attribute()),
        Span::call_site(),
    );
    let build_signature = quote! {
        ::pointfree::Signature::builder(#name_literal)
            #(#builder_calls)*
            .build()
            .expect(#expectation)
    };

    let Some((self_receiver, _)) = receiver else {
        return Ok(quote! {
            #(#attrs)*
            #vis fn #name() -> #wrapper_path {
                #[allow(clippy::needless_pass_by_value, clippy::too_many_arguments)]
                fn __pointfree_body(#(#inner_parameters),*) #output #block

                static WRAPPED: ::std::sync::LazyLock<#wrapper_path> =
                    ::std::sync::LazyLock::new(|| {
                        let signature = #build_signature;
                        #wrapper_path::define(signature, |#frame: ::pointfree::Frame| {
                            #(#extractions)*
                            #invoke
                        })
                    });

                ::std::clone::Clone::clone(&*WRAPPED)
            }
        });
    };

    Ok(quote! {
        #(#attrs)*
        #vis fn #name(&self) -> #wrapper_path {
            let signature = #build_signature;
            let #this = ::std::clone::Clone::clone(self);
            #wrapper_path::define(signature, move |#frame: ::pointfree::Frame| {
                #(#extractions)*
                #invoke
            })
        }

        #[doc(hidden)]
        #[allow(clippy::needless_pass_by_value, clippy::too_many_arguments)]
        fn #hidden(#self_receiver, #(#inner_parameters),*) #output #block
    })
}

fn validate_signature(signature: &Signature, wrapper: Wrapper) -> syn::Result<()> {
    let attribute = wrapper.attribute();
    let reject = |span: Span, what: &str| {
        Err(syn::Error::new(
            span,
            format!("{attribute} does not support {what}"),
        ))
    };

    if let Some(token) = &signature.asyncness {
        return reject(token.span(), "async functions");
    }
    if let Some(token) = &signature.constness {
        return reject(token.span(), "const functions");
    }
    if let Some(token) = &signature.unsafety {
        return reject(token.span(), "unsafe functions");
    }
    if let Some(variadic) = &signature.variadic {
        return reject(variadic.span(), "C variadics");
    }
    if !signature.generics.params.is_empty() || signature.generics.where_clause.is_some() {
        return reject(signature.generics.span(), "generic functions");
    }
    Ok(())
}

fn parse_receiver(
    signature: &Signature,
    wrapper: Wrapper,
) -> syn::Result<Option<(Receiver, SelfBinding)>> {
    let Some(receiver) = signature.receiver() else {
        return Ok(None);
    };
    let attribute = wrapper.attribute();

    if receiver.colon_token.is_some() {
        return Err(syn::Error::new(
            receiver.span(),
            format!("{attribute} supports only `&self` and `self` receivers"),
        ));
    }
    match &receiver.reference {
        Some(_) if receiver.mutability.is_some() => Err(syn::Error::new(
            receiver.span(),
            format!("{attribute} does not support `&mut self`; the receiver is shared by every call"),
        )),
        Some(_) => Ok(Some((receiver.clone(), SelfBinding::Borrowed))),
        None => Ok(Some((receiver.clone(), SelfBinding::Owned))),
    }
}

fn parse_parameters(signature: &Signature, wrapper: Wrapper) -> syn::Result<Vec<Parameter>> {
    let attribute = wrapper.attribute();
    let mut parameters: Vec<Parameter> = Vec::with_capacity(signature.inputs.len());

    for input in &signature.inputs {
        let FnArg::Typed(typed) = input else {
            continue;
        };

        let (name, mutability) = match typed.pat.as_ref() {
            Pat::Ident(pattern) if pattern.by_ref.is_none() && pattern.subpat.is_none() => {
                (pattern.ident.clone(), pattern.mutability)
            }
            other => {
                return Err(syn::Error::new(
                    other.span(),
                    format!("{attribute} parameters must be plain identifiers"),
                ));
            }
        };

        if matches!(typed.ty.as_ref(), Type::Reference(_) | Type::ImplTrait(_)) {
            return Err(syn::Error::new(
                typed.ty.span(),
                format!("{attribute} parameters must have owned, concrete types"),
            ));
        }

        let (kind, default, attributes) = parse_parameter_attributes(&typed.attrs)?;
        let parameter = Parameter {
            attributes,
            mutability,
            name,
            ty: typed.ty.as_ref().clone(),
            kind,
            default,
        };
        check_order(&parameters, &parameter)?;
        parameters.push(parameter);
    }

    Ok(parameters)
}

fn parse_parameter_attributes(
    attributes: &[Attribute],
) -> syn::Result<(Kind, Option<Expr>, Vec<Attribute>)> {
    let mut kind: Option<(Kind, Span)> = None;
    let mut default: Option<Expr> = None;
    let mut remaining = Vec::new();

    for attribute in attributes {
        let marker = if attribute.path().is_ident("rest") {
            Some(Kind::Rest)
        } else if attribute.path().is_ident("keyword_only") {
            Some(Kind::KeywordOnly)
        } else if attribute.path().is_ident("keywords") {
            Some(Kind::Keywords)
        } else {
            None
        };

        if let Some(marker) = marker {
            attribute.meta.require_path_only()?;
            if kind.is_some() {
                return Err(syn::Error::new(
                    attribute.span(),
                    "a parameter takes at most one of #[rest], #[keyword_only] and #[keywords]",
                ));
            }
            kind = Some((marker, attribute.span()));
        } else if attribute.path().is_ident("default") {
            if default.is_some() {
                return Err(syn::Error::new(attribute.span(), "duplicate #[default]"));
            }
            default = Some(attribute.parse_args::<Expr>()?);
        } else {
            remaining.push(attribute.clone());
        }
    }

    let (kind, span) = kind.unwrap_or((Kind::Positional, Span::call_site()));
    if default.is_some() && matches!(kind, Kind::Rest | Kind::Keywords) {
        return Err(syn::Error::new(
            span,
            format!("a {} cannot have a default", kind.describe()),
        ));
    }
    Ok((kind, default, remaining))
}

fn check_order(previous: &[Parameter], parameter: &Parameter) -> syn::Result<()> {
    let Some(last) = previous.last() else {
        return Ok(());
    };

    if parameter.kind < last.kind {
        return Err(syn::Error::new(
            parameter.name.span(),
            format!(
                "a {} cannot follow a {}",
                parameter.kind.describe(),
                last.kind.describe()
            ),
        ));
    }
    if matches!(parameter.kind, Kind::Rest | Kind::Keywords) && parameter.kind == last.kind {
        return Err(syn::Error::new(
            parameter.name.span(),
            format!("only one {} is allowed", parameter.kind.describe()),
        ));
    }
    if parameter.kind == Kind::Positional
        && parameter.default.is_none()
        && previous
            .iter()
            .any(|earlier| earlier.kind == Kind::Positional && earlier.default.is_some())
    {
        return Err(syn::Error::new(
            parameter.name.span(),
            "a required parameter cannot follow one with #[default]",
        ));
    }
    Ok(())
}

fn returns_result(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Result"),
        Type::Paren(inner) => returns_result(&inner.elem),
        Type::Group(inner) => returns_result(&inner.elem),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn expand_pointfree(item: TokenStream2) -> syn::Result<String> {
        expand(TokenStream2::new(), item, Wrapper::Pointfree).map(|tokens| tokens.to_string())
    }

    fn error_of(item: TokenStream2) -> String {
        match expand_pointfree(item) {
            Ok(tokens) => panic!("expected an error, got {tokens}"),
            Err(error) => error.to_string(),
        }
    }

    #[rstest]
    fn test_expands_builder_calls() {
        let expanded = expand_pointfree(quote! {
            fn render(
                template: String,
                #[default(2)] indent: i64,
                #[rest] parts: Vec<String>,
                #[keyword_only] style: String,
                #[keywords] options: Keywords,
            ) -> String {
                template
            }
        })
        .unwrap();

        assert!(expanded.contains(". positional (\"template\")"));
        assert!(expanded.contains(". optional (\"indent\" , 2)"));
        assert!(expanded.contains(". rest (\"parts\")"));
        assert!(expanded.contains(". keyword_only (\"style\")"));
        assert!(expanded.contains(". keywords (\"options\")"));
        assert!(expanded.contains("fn render () -> :: pointfree :: Pointfree"));
    }

    #[rstest]
    fn test_partial_wrapper_path() {
        let expanded = expand(
            TokenStream2::new(),
            quote! { fn id(x: i64) -> i64 { x } },
            Wrapper::Partial,
        )
        .unwrap()
        .to_string();
        assert!(expanded.contains(":: pointfree :: Partial :: define"));
    }

    #[rstest]
    fn test_result_return_is_mapped() {
        let expanded = expand_pointfree(quote! {
            fn parse(text: String) -> Result<i64, CallError> { Ok(1) }
        })
        .unwrap();
        assert!(expanded.contains("map_err"));
    }

    #[rstest]
    #[case(quote! { async fn f(a: i64) {} }, "async functions")]
    #[case(quote! { fn f<T>(a: T) {} }, "generic functions")]
    #[case(quote! { fn f(&mut self) {} }, "does not support `&mut self`")]
    #[case(quote! { fn f(self: Box<Self>) {} }, "only `&self` and `self`")]
    #[case(quote! { fn f((a, b): (i64, i64)) {} }, "plain identifiers")]
    #[case(quote! { fn f(a: &str) {} }, "owned, concrete types")]
    #[case(quote! { fn f(#[default(1)] a: i64, b: i64) {} }, "required parameter cannot follow")]
    #[case(quote! { fn f(#[rest] a: Vec<i64>, b: i64) {} }, "positional parameter cannot follow")]
    #[case(quote! { fn f(#[rest] a: Vec<i64>, #[rest] b: Vec<i64>) {} }, "only one #[rest]")]
    #[case(quote! { fn f(#[default(1)] #[rest] a: Vec<i64>) {} }, "cannot have a default")]
    #[case(quote! { fn f(#[keywords] a: Keywords, #[keyword_only] b: i64) {} }, "cannot follow")]
    #[case(quote! { fn f(#[rest] #[keywords] a: Keywords) {} }, "at most one")]
    fn test_rejects_invalid_signatures(#[case] item: TokenStream2, #[case] message: &str) {
        let error = error_of(item);
        assert!(error.contains(message), "unexpected error: {error}");
    }

    #[rstest]
    #[case(quote! { fn scale(&self, x: i64) -> i64 { self.0 * x } }, "Self :: __pointfree_scale (& __pointfree_self , x)")]
    #[case(quote! { fn scale(self, x: i64) -> i64 { self.0 * x } }, "Self :: __pointfree_scale (:: std :: clone :: Clone :: clone (& __pointfree_self) , x)")]
    fn test_method_binds_receiver_clone(#[case] item: TokenStream2, #[case] call: &str) {
        let expanded = expand_pointfree(item).unwrap();

        assert!(expanded.contains("fn scale (& self) -> :: pointfree :: Pointfree"));
        assert!(expanded.contains("fn __pointfree_scale ("));
        assert!(expanded.contains(call), "{expanded}");
        assert!(!expanded.contains(". positional (\"self\")"));
        assert!(!expanded.contains("LazyLock"));
    }

    #[rstest]
    fn test_rejects_attribute_arguments() {
        let error = expand(
            quote! { eager },
            quote! { fn f(a: i64) {} },
            Wrapper::Pointfree,
        )
        .unwrap_err();
        assert!(error.to_string().contains("takes no arguments"));
    }

    #[rstest]
    fn test_keyword_only_default_after_required_is_allowed() {
        assert!(expand_pointfree(quote! {
            fn f(a: i64, #[keyword_only] #[default(0)] b: i64, #[keyword_only] c: i64) {}
        })
        .is_ok());
    }

    #[rstest]
    #[case(quote! { Result<i64, CallError> }, true)]
    #[case(quote! { std::io::Result<()> }, true)]
    #[case(quote! { i64 }, false)]
    #[case(quote! { Vec<Result<i64, CallError>> }, false)]
    fn test_returns_result(#[case] ty: TokenStream2, #[case] expected: bool) {
        let ty: Type = syn::parse2(ty).unwrap();
        assert_eq!(returns_result(&ty), expected);
    }
}
