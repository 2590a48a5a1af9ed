use quote::ToTokens;
use std::collections::HashSet;
use syn::{Attribute, Token, punctuated::Punctuated};

// 归一化 derive 的去重键，避免 Serialize/serde::Serialize 重复
fn derive_key(path: &syn::Path) -> String {
    match path.segments.last() {
        Some(last) => {
            let ident = last.ident.to_string();
            match ident.as_str() {
                "Serialize" | "Deserialize" => format!("serde::{ident}"),
                _ => ident,
            }
        }
        None => path.to_token_stream().to_string(),
    }
}

/// 把默认派生合并进属性列表：required 在前、既有在后、按键去重，
/// 合并后的 derive 属性置于全部属性之前
pub(crate) fn apply_derives(attrs: &mut Vec<Attribute>, required: Vec<syn::Path>) {
    let mut retained = Vec::new();
    let mut existing: Vec<syn::Path> = Vec::new();

    for attr in attrs.iter() {
        if attr.path().is_ident("derive") {
            if let Ok(list) =
                attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
            {
                existing.extend(list);
            }
        } else {
            retained.push(attr.clone());
        }
    }

    let mut seen = HashSet::<String>::new();
    let mut merged: Vec<syn::Path> = Vec::new();
    for path in required.into_iter().chain(existing) {
        if seen.insert(derive_key(&path)) {
            merged.push(path);
        }
    }

    let derive_attr: Attribute = syn::parse_quote!(#[derive(#(#merged),*)]);
    *attrs = std::iter::once(derive_attr).chain(retained).collect();
}
