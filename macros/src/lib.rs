//! Derive macros for the Reflux framework
//!
//! This crate provides procedural macros to reduce boilerplate when
//! declaring action enums.
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Implements `reflux_core::Action` for an enum
//!
//! # Example
//!
//! ```ignore
//! use reflux_core::Action as _;
//! use reflux_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TodoAction {
//!     AddItem { text: String },
//!
//!     #[kind = "TODO/CLEAR"]
//!     ClearItems,
//! }
//!
//! // Generated:
//! assert_eq!(TodoAction::AddItem { text: "milk".into() }.kind(), "ADD_ITEM");
//! assert_eq!(TodoAction::ClearItems.kind(), "TODO/CLEAR");
//! assert_eq!(TodoAction::KINDS, &["ADD_ITEM", "TODO/CLEAR"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Expr, ExprLit, Fields, Lit, Meta};

/// Derive macro for Action enums
///
/// Implements `reflux_core::Action` so that `kind()` returns the variant's
/// name in `SCREAMING_SNAKE_CASE`, and adds an associated `KINDS` constant
/// listing every kind in declaration order.
///
/// # Attributes
///
/// - `#[kind = "..."]` - Override the kind string of a single variant
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - A `#[kind]` attribute is not of the form `#[kind = "literal"]`
/// - Two variants end up with the same kind
///
/// # Example
///
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// enum FormAction {
///     AddItem { text: String },
///     RemoveItem(usize),
///     Reset,
/// }
///
/// assert_eq!(FormAction::RemoveItem(0).kind(), "REMOVE_ITEM");
/// assert_eq!(FormAction::Reset.kind(), "RESET");
/// ```
#[proc_macro_derive(Action, attributes(kind))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut kinds: Vec<String> = Vec::with_capacity(data_enum.variants.len());
    let mut arms = Vec::with_capacity(data_enum.variants.len());

    for variant in &data_enum.variants {
        let variant_name = &variant.ident;

        let kind = match kind_override(&variant.attrs) {
            Ok(Some(kind)) => kind,
            Ok(None) => screaming_snake_case(&variant_name.to_string()),
            Err(error) => return error.to_compile_error().into(),
        };

        if kinds.contains(&kind) {
            return syn::Error::new_spanned(
                variant,
                format!("Duplicate action kind \"{kind}\""),
            )
            .to_compile_error()
            .into();
        }

        arms.push(match &variant.fields {
            Fields::Named(_) => quote! { Self::#variant_name { .. } => #kind, },
            Fields::Unnamed(_) => quote! { Self::#variant_name(..) => #kind, },
            Fields::Unit => quote! { Self::#variant_name => #kind, },
        });
        kinds.push(kind);
    }

    // Uninhabited enums still need a well-formed match
    let body = if arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(#arms)*
            }
        }
    };

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Every action kind of this enum, in declaration order
            pub const KINDS: &'static [&'static str] = &[#(#kinds),*];
        }

        impl #impl_generics ::reflux_core::Action for #name #ty_generics #where_clause {
            fn kind(&self) -> &'static str {
                #body
            }
        }
    };

    TokenStream::from(expanded)
}

/// Reads `#[kind = "..."]` from a variant's attributes
fn kind_override(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let Some(attr) = attrs.iter().find(|attr| attr.path().is_ident("kind")) else {
        return Ok(None);
    };

    if let Meta::NameValue(name_value) = &attr.meta {
        if let Expr::Lit(ExprLit {
            lit: Lit::Str(value),
            ..
        }) = &name_value.value
        {
            let kind = value.value();
            if kind.is_empty() {
                return Err(syn::Error::new_spanned(value, "Action kind cannot be empty"));
            }
            return Ok(Some(kind));
        }
    }

    Err(syn::Error::new_spanned(
        attr,
        "Expected #[kind = \"...\"] with a string literal",
    ))
}

/// `AddItem` → `ADD_ITEM`, `HTTPRequest` → `HTTP_REQUEST`
fn screaming_snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev != '_' && (prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)) {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
    }

    out
}
