use crate::derive_utils::apply_derives;
use crate::field_utils::prepend_fields;
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{
    Ident, Item, ItemStruct, Result, Token, Type, parse::Parse, parse::ParseStream,
    parse_macro_input,
};

/// #[aggregate] 宏实现
/// - 追加字段（若缺失）并置于字段最前：`id: IdType`、`version: usize`、
///   `#[serde(skip)] tracking: ChangeTracker`、`#[serde(skip)] broken_rules: BrokenRules`
/// - 自动实现 `::tracking_domain::entity::Entity` 与 `::tracking_domain::tracking::Tracked`
/// - 支持参数：`#[aggregate(id = IdType, debug = true|false)]`；
///   - `id` 默认 `String`
///   - `debug` 默认 `true`（派生 Debug）
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as AggregateAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[aggregate] only on struct")
                .to_compile_error()
                .into();
        }
    };

    // 仅支持具名字段结构体
    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let id_type = cfg.id_ty.unwrap_or_else(|| syn::parse_quote! { String });

    // 注入簿记字段；跟踪器与违规收集器不参与序列化投影
    let prototypes: Vec<syn::Field> = vec![
        syn::parse_quote! { id: #id_type },
        syn::parse_quote! { version: usize },
        syn::parse_quote! {
            #[serde(skip)]
            tracking: ::tracking_domain::tracking::ChangeTracker
        },
        syn::parse_quote! {
            #[serde(skip)]
            broken_rules: ::tracking_domain::broken_rules::BrokenRules
        },
    ];
    prepend_fields(fields_named, prototypes);

    // 合并默认派生：Debug（可关）、Default、Serialize、Deserialize
    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Default),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    if cfg.derive_debug.unwrap_or(true) {
        required.insert(0, syn::parse_quote!(Debug));
    }
    apply_derives(&mut st.attrs, required);

    let out_struct = ItemStruct { ..st };

    let ident = &out_struct.ident;
    let generics = out_struct.generics.clone();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        #out_struct

        impl #impl_generics ::tracking_domain::entity::Entity for #ident #ty_generics #where_clause {
            type Id = #id_type;

            fn new(id: Self::Id) -> Self {
                Self {
                    id,
                    version: 0,
                    ..::std::default::Default::default()
                }
            }

            fn id(&self) -> &Self::Id {
                &self.id
            }

            fn version(&self) -> usize {
                self.version
            }
        }

        impl #impl_generics ::tracking_domain::tracking::Tracked for #ident #ty_generics #where_clause {
            fn tracker(&self) -> &::tracking_domain::tracking::ChangeTracker {
                &self.tracking
            }

            fn tracker_mut(&mut self) -> &mut ::tracking_domain::tracking::ChangeTracker {
                &mut self.tracking
            }

            fn broken_rules(&self) -> &::tracking_domain::broken_rules::BrokenRules {
                &self.broken_rules
            }

            fn broken_rules_mut(&mut self) -> &mut ::tracking_domain::broken_rules::BrokenRules {
                &mut self.broken_rules
            }
        }
    };

    TokenStream::from(expanded)
}

// -------- parsing --------

struct AggregateAttrConfig {
    id_ty: Option<Type>,
    derive_debug: Option<bool>,
}

impl Parse for AggregateAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut id_ty: Option<Type> = None;
        let mut derive_debug: Option<bool> = None;

        while !input.is_empty() {
            let key: Ident = input.parse()?;
            let _eq: Token![=] = input.parse()?;

            if key == "id" {
                if id_ty.is_some() {
                    return Err(syn::Error::new(key.span(), "duplicate key 'id' in attribute"));
                }
                id_ty = Some(input.parse()?);
            } else if key == "debug" {
                if derive_debug.is_some() {
                    return Err(syn::Error::new(
                        key.span(),
                        "duplicate key 'debug' in attribute",
                    ));
                }
                let lit: syn::LitBool = input.parse()?;
                derive_debug = Some(lit.value());
            } else {
                return Err(syn::Error::new(
                    key.span(),
                    "unknown key in attribute; expected 'id' | 'debug'",
                ));
            }

            if input.is_empty() {
                break;
            }
            let _comma: Token![,] = input.parse()?;
        }

        Ok(Self { id_ty, derive_debug })
    }
}
