use syn::{Field, FieldsNamed, Token, punctuated::Punctuated};

/// 确保具名字段结构体以给定原型字段开头
///
/// 对每个原型按顺序处理：若同名字段已存在则复用原定义（移至最前），
/// 否则采用原型（可携带字段级属性，例如 `#[serde(skip)]`）。
/// 其余字段保持原有相对顺序。
pub(crate) fn prepend_fields(fields_named: &mut FieldsNamed, prototypes: Vec<Field>) {
    let old_named = fields_named.named.clone();
    let mut new_named: Punctuated<Field, Token![,]> = Punctuated::new();

    for prototype in prototypes.iter() {
        let existing = old_named.iter().find(|field| {
            match (&field.ident, &prototype.ident) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
        });
        match existing {
            Some(field) => new_named.push(field.clone()),
            None => new_named.push(prototype.clone()),
        }
    }

    for field in old_named.into_iter() {
        let is_injected = field
            .ident
            .as_ref()
            .map(|ident| {
                prototypes
                    .iter()
                    .any(|prototype| prototype.ident.as_ref() == Some(ident))
            })
            .unwrap_or(false);
        if !is_injected {
            new_named.push(field);
        }
    }

    fields_named.named = new_named;
}
