//! `#[derive(Codec)]` for wire message types.
//!
//! The shapes that cross this workspace's wire (plain structs and enums of
//! primitives, strings, vectors and each other) are simple enough that a
//! minimal hand-rolled token parser covers them without a `syn` dependency.

use proc_macro::TokenStream;
use proc_macro2::{Delimiter, Ident, Span, TokenStream as TokenStream2, TokenTree};
use quote::quote;

struct NamedField {
    name: Ident,
    ty: TokenStream2,
}

enum Fields {
    Named(Vec<NamedField>),
    Tuple(Vec<TokenStream2>),
    Unit,
}

struct Variant {
    name: Ident,
    fields: Fields,
}

enum Item {
    Struct(Fields),
    Enum(Vec<Variant>),
}

/// Collect tokens for one type, stopping at a top-level `,` or end of input.
/// Tracks `<>` depth so generic types like `Vec<String>` stay whole.
fn collect_type(tokens: &[TokenTree], start: usize) -> (TokenStream2, usize) {
    let mut depth = 0usize;
    let mut i = start;
    let mut out = Vec::new();

    while i < tokens.len() {
        match &tokens[i] {
            TokenTree::Punct(p) if p.as_char() == ',' && depth == 0 => break,
            TokenTree::Punct(p) if p.as_char() == '<' => {
                depth += 1;
                out.push(tokens[i].clone());
            }
            TokenTree::Punct(p) if p.as_char() == '>' => {
                depth = depth.saturating_sub(1);
                out.push(tokens[i].clone());
            }
            _ => out.push(tokens[i].clone()),
        }
        i += 1;
    }

    (out.into_iter().collect(), i)
}

fn skip_comma(tokens: &[TokenTree], i: &mut usize) {
    if let Some(TokenTree::Punct(p)) = tokens.get(*i) {
        if p.as_char() == ',' {
            *i += 1;
        }
    }
}

fn parse_named_fields(group: &proc_macro2::Group) -> Vec<NamedField> {
    let tokens: Vec<_> = group.stream().into_iter().collect();
    let mut fields = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        // field_name : Type ,  (visibility and attributes are skipped by the
        // ident match below falling through until the `:` pattern holds)
        let name = match &tokens[i] {
            TokenTree::Ident(id) => id.clone(),
            _ => {
                i += 1;
                continue;
            }
        };
        i += 1;

        match tokens.get(i) {
            Some(TokenTree::Punct(p)) if p.as_char() == ':' => i += 1,
            _ => continue, // `pub` or similar, not a field name
        }

        let (ty, end) = collect_type(&tokens, i);
        i = end;
        skip_comma(&tokens, &mut i);

        fields.push(NamedField { name, ty });
    }

    fields
}

fn parse_tuple_fields(group: &proc_macro2::Group) -> Vec<TokenStream2> {
    let tokens: Vec<_> = group.stream().into_iter().collect();
    let mut fields = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let (ty, end) = collect_type(&tokens, i);
        i = end;
        skip_comma(&tokens, &mut i);

        if !ty.is_empty() {
            fields.push(ty);
        }
    }

    fields
}

fn parse_variants(group: &proc_macro2::Group) -> Vec<Variant> {
    let tokens: Vec<_> = group.stream().into_iter().collect();
    let mut variants = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let name = match &tokens[i] {
            TokenTree::Ident(id) => id.clone(),
            _ => {
                i += 1;
                continue;
            }
        };
        i += 1;

        let fields = match tokens.get(i) {
            Some(TokenTree::Group(g)) if g.delimiter() == Delimiter::Brace => {
                i += 1;
                Fields::Named(parse_named_fields(g))
            }
            Some(TokenTree::Group(g)) if g.delimiter() == Delimiter::Parenthesis => {
                i += 1;
                Fields::Tuple(parse_tuple_fields(g))
            }
            _ => Fields::Unit,
        };
        skip_comma(&tokens, &mut i);

        variants.push(Variant { name, fields });
    }

    variants
}

fn parse_input(input: TokenStream2) -> (Ident, Item) {
    let tokens: Vec<_> = input.into_iter().collect();

    // Skip attributes, doc comments and visibility until `struct` or `enum`.
    let mut i = 0;
    let mut kind = None;
    while i < tokens.len() {
        if let TokenTree::Ident(id) = &tokens[i] {
            let s = id.to_string();
            if s == "struct" || s == "enum" {
                kind = Some(s);
                i += 1;
                break;
            }
        }
        i += 1;
    }
    let kind = kind.expect("Codec derive expects a struct or enum");

    let name = match &tokens[i] {
        TokenTree::Ident(id) => id.clone(),
        _ => panic!("Codec derive expects an item name"),
    };
    i += 1;

    if kind == "struct" {
        loop {
            match tokens.get(i) {
                None => return (name, Item::Struct(Fields::Unit)),
                Some(TokenTree::Group(g)) if g.delimiter() == Delimiter::Brace => {
                    return (name, Item::Struct(Fields::Named(parse_named_fields(g))));
                }
                Some(TokenTree::Group(g)) if g.delimiter() == Delimiter::Parenthesis => {
                    return (name, Item::Struct(Fields::Tuple(parse_tuple_fields(g))));
                }
                Some(TokenTree::Punct(p)) if p.as_char() == ';' => {
                    return (name, Item::Struct(Fields::Unit));
                }
                Some(_) => i += 1,
            }
        }
    }

    while i < tokens.len() {
        if let TokenTree::Group(g) = &tokens[i] {
            if g.delimiter() == Delimiter::Brace {
                return (name, Item::Enum(parse_variants(g)));
            }
        }
        i += 1;
    }
    panic!("Codec derive expects an enum body");
}

fn gen_named_decode(fields: &[NamedField]) -> TokenStream2 {
    let field_decodes = fields.iter().map(|f| {
        let name = &f.name;
        let ty = &f.ty;
        quote! { #name: <#ty as codec::Codec>::decode(buf, pos)?, }
    });
    quote! { { #(#field_decodes)* } }
}

fn gen_tuple_decode(fields: &[TokenStream2]) -> TokenStream2 {
    let field_decodes = fields.iter().map(|ty| {
        quote! { <#ty as codec::Codec>::decode(buf, pos)?, }
    });
    quote! { ( #(#field_decodes)* ) }
}

#[proc_macro_derive(Codec)]
pub fn derive_codec(input: TokenStream) -> TokenStream {
    let (name, item) = parse_input(input.into());

    let (encode_body, decode_body) = match &item {
        Item::Struct(fields) => match fields {
            Fields::Named(fields) => {
                let enc = fields.iter().map(|f| {
                    let name = &f.name;
                    quote! { self.#name.encode(buf); }
                });
                let dec = gen_named_decode(fields);
                (quote! { #(#enc)* }, quote! { Ok(Self #dec) })
            }
            Fields::Tuple(fields) => {
                let enc = fields.iter().enumerate().map(|(i, _)| {
                    let idx = proc_macro2::Literal::usize_unsuffixed(i);
                    quote! { self.#idx.encode(buf); }
                });
                let dec = gen_tuple_decode(fields);
                (quote! { #(#enc)* }, quote! { Ok(Self #dec) })
            }
            Fields::Unit => (quote! {}, quote! { Ok(Self) }),
        },
        Item::Enum(variants) => {
            let encode_arms = variants.iter().enumerate().map(|(i, v)| {
                let vname = &v.name;
                let disc = i as u32;
                match &v.fields {
                    Fields::Named(fields) => {
                        let names: Vec<_> = fields.iter().map(|f| &f.name).collect();
                        let encodes = names.iter().map(|n| quote! { #n.encode(buf); });
                        quote! {
                            #name::#vname { #(#names),* } => {
                                (#disc as u32).encode(buf);
                                #(#encodes)*
                            }
                        }
                    }
                    Fields::Tuple(fields) => {
                        let bindings: Vec<_> = (0..fields.len())
                            .map(|i| Ident::new(&format!("f{i}"), Span::call_site()))
                            .collect();
                        let encodes = bindings.iter().map(|b| quote! { #b.encode(buf); });
                        quote! {
                            #name::#vname(#(#bindings),*) => {
                                (#disc as u32).encode(buf);
                                #(#encodes)*
                            }
                        }
                    }
                    Fields::Unit => quote! {
                        #name::#vname => {
                            (#disc as u32).encode(buf);
                        }
                    },
                }
            });

            let decode_arms = variants.iter().enumerate().map(|(i, v)| {
                let vname = &v.name;
                let disc = i as u32;
                match &v.fields {
                    Fields::Named(fields) => {
                        let dec = gen_named_decode(fields);
                        quote! { #disc => Ok(#name::#vname #dec), }
                    }
                    Fields::Tuple(fields) => {
                        let dec = gen_tuple_decode(fields);
                        quote! { #disc => Ok(#name::#vname #dec), }
                    }
                    Fields::Unit => quote! { #disc => Ok(#name::#vname), },
                }
            });

            let encode = quote! {
                match self {
                    #(#encode_arms)*
                }
            };
            let decode = quote! {
                let variant = <u32 as codec::Codec>::decode(buf, pos)?;
                match variant {
                    #(#decode_arms)*
                    v => Err(codec::DecodeError::InvalidVariant(v)),
                }
            };
            (encode, decode)
        }
    };

    // allow(unused_variables) keeps zero-field items from warning about
    // the untouched buf/pos parameters.
    let expanded = quote! {
        impl codec::Codec for #name {
            #[allow(unused_variables)]
            fn encode(&self, buf: &mut Vec<u8>) {
                #encode_body
            }

            #[allow(unused_variables)]
            fn decode(buf: &[u8], pos: &mut usize) -> Result<Self, codec::DecodeError> {
                #decode_body
            }
        }
    };

    TokenStream::from(expanded)
}
