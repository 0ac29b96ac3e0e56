//! Campos de actualización parcial
//!
//! Un `PUT` sólo reemplaza las claves presentes en el body. `Patch<T>`
//! distingue entre clave ausente, `null` explícito y valor.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Patch<T> {
    #[default]
    Missing,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    /// Aplica el patch sobre un valor actual
    pub fn apply_to(self, current: &mut Option<T>) {
        match self {
            Patch::Missing => {}
            Patch::Null => *current = None,
            Patch::Value(v) => *current = Some(v),
        }
    }
}

// Requiere #[serde(default)] en el campo para que la ausencia sea Missing
impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default)]
        nota: Patch<String>,
    }

    #[test]
    fn test_patch_deserialize() {
        let absent: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.nota, Patch::Missing);

        let null: Body = serde_json::from_str(r#"{"nota": null}"#).unwrap();
        assert_eq!(null.nota, Patch::Null);

        let value: Body = serde_json::from_str(r#"{"nota": "frágil"}"#).unwrap();
        assert_eq!(value.nota, Patch::Value("frágil".to_string()));
    }

    #[test]
    fn test_patch_apply_to() {
        let mut current = Some(3);
        Patch::Missing.apply_to(&mut current);
        assert_eq!(current, Some(3));
        Patch::Value(5).apply_to(&mut current);
        assert_eq!(current, Some(5));
        Patch::Null.apply_to(&mut current);
        assert_eq!(current, None);
    }
}
