//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para normalizar la entrada
//! de los formularios: cantidades de bultos y fechas.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use validator::ValidationError;

use crate::utils::errors::{AppError, AppResult};
use crate::utils::patch::Patch;

/// Formatos de fecha aceptados, en orden de prueba
const FORMATOS_FECHA: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Convertir cualquier valor JSON en una cantidad de bultos no negativa.
///
/// Los valores vacíos o no numéricos se normalizan a 0; los decimales se
/// truncan y los negativos se llevan a 0. Nunca falla.
pub fn coerce_bultos(value: &Value) -> i32 {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => parse_leading_int(s),
        _ => 0,
    };
    parsed.clamp(0, i32::MAX as i64) as i32
}

/// Parsea el prefijo entero de un string ("12 cajas" -> 12, "abc" -> 0)
fn parse_leading_int(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let value = digits
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .fold(0i64, |acc, c| {
            acc.saturating_mul(10)
                .saturating_add(c.to_digit(10).unwrap_or(0) as i64)
        });

    if negative {
        -value
    } else {
        value
    }
}

/// Deserializer para campos `cant_bultos` opcionales.
///
/// Ausente -> `None`; presente (incluido `null` o basura) -> `Some(n)` con la
/// coerción de [`coerce_bultos`].
pub fn deserialize_bultos<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(coerce_bultos(&value)))
}

/// Interpreta una referencia a otra tabla: número o string numérico.
/// `null`, `""` o valores no numéricos significan "sin referencia".
fn coerce_id(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}

/// Deserializer para ids opcionales en altas
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_id(&value))
}

/// Deserializer para ids en actualizaciones parciales (`""` limpia la referencia)
pub fn deserialize_id_patch<'de, D>(deserializer: D) -> Result<Patch<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match coerce_id(&value) {
        Some(id) => Patch::Value(id),
        None => Patch::Null,
    })
}

/// Normalizar una fecha a día calendario, descartando la hora.
///
/// Se toma la parte de fecha tal como viene escrita (sin convertir zona
/// horaria), de modo que "2024-05-03T23:30:00-03:00" es el 3 de mayo.
pub fn normalize_fecha(raw: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let date_part = trimmed
        .split(|c| c == 'T' || c == ' ')
        .next()
        .unwrap_or(trimmed);

    FORMATOS_FECHA
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
        .map(Some)
        .ok_or_else(|| {
            let mut error = ValidationError::new("date");
            error.add_param("value".into(), &raw.to_string());
            error.add_param("format".into(), &"YYYY-MM-DD".to_string());
            error
        })
}

/// Normaliza un campo de fecha opcional y traduce el fallo a `AppError`
pub fn parse_fecha(field: &str, raw: Option<&str>) -> AppResult<Option<NaiveDate>> {
    match raw {
        None => Ok(None),
        Some(value) => normalize_fecha(value)
            .map_err(|_| AppError::BadRequest(format!("Fecha inválida en '{}': '{}'", field, value))),
    }
}

/// Igual que [`parse_fecha`] pero para actualizaciones parciales
pub fn parse_fecha_patch(field: &str, raw: Patch<String>) -> AppResult<Patch<NaiveDate>> {
    match raw {
        Patch::Missing => Ok(Patch::Missing),
        Patch::Null => Ok(Patch::Null),
        Patch::Value(value) => Ok(match parse_fecha(field, Some(&value))? {
            Some(fecha) => Patch::Value(fecha),
            None => Patch::Null,
        }),
    }
}

/// Validar que un valor esté en una lista de valores permitidos
pub fn validate_enum(value: &str, allowed_values: &[&str]) -> Result<(), ValidationError> {
    if !allowed_values.contains(&value) {
        let mut error = ValidationError::new("enum");
        error.add_param("value".into(), &value.to_string());
        error.add_param("allowed_values".into(), &format!("{:?}", allowed_values));
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_bultos_numbers() {
        assert_eq!(coerce_bultos(&json!(6)), 6);
        assert_eq!(coerce_bultos(&json!(4.9)), 4);
        assert_eq!(coerce_bultos(&json!(-3)), 0);
    }

    #[test]
    fn test_coerce_bultos_strings() {
        assert_eq!(coerce_bultos(&json!("12")), 12);
        assert_eq!(coerce_bultos(&json!(" 7 cajas")), 7);
        assert_eq!(coerce_bultos(&json!("3.5")), 3);
        assert_eq!(coerce_bultos(&json!("")), 0);
        assert_eq!(coerce_bultos(&json!("abc")), 0);
        assert_eq!(coerce_bultos(&json!("-8")), 0);
    }

    #[test]
    fn test_coerce_bultos_other_values() {
        assert_eq!(coerce_bultos(&Value::Null), 0);
        assert_eq!(coerce_bultos(&json!(true)), 0);
        assert_eq!(coerce_bultos(&json!([1, 2])), 0);
        assert_eq!(coerce_bultos(&json!("99999999999999999999")), i32::MAX);
    }

    #[test]
    fn test_normalize_fecha_strips_time() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 3);
        assert_eq!(normalize_fecha("2024-05-03").unwrap(), expected);
        assert_eq!(normalize_fecha("2024-05-03T23:30:00-03:00").unwrap(), expected);
        assert_eq!(normalize_fecha("2024-05-03T02:00:00.000Z").unwrap(), expected);
        assert_eq!(normalize_fecha("2024-05-03 10:15:00").unwrap(), expected);
        assert_eq!(normalize_fecha("03/05/2024").unwrap(), expected);
    }

    #[test]
    fn test_normalize_fecha_empty_and_invalid() {
        assert_eq!(normalize_fecha("   ").unwrap(), None);
        assert!(normalize_fecha("mañana").is_err());
        assert!(normalize_fecha("2024-13-40").is_err());
    }

    #[test]
    fn test_parse_fecha_patch() {
        assert_eq!(parse_fecha_patch("f", Patch::Missing).unwrap(), Patch::Missing);
        assert_eq!(parse_fecha_patch("f", Patch::Null).unwrap(), Patch::Null);
        assert_eq!(parse_fecha_patch("f", Patch::Value(String::new())).unwrap(), Patch::Null);
        assert!(matches!(
            parse_fecha_patch("f", Patch::Value("x".into())),
            Err(AppError::BadRequest(_))
        ));
    }

    #[derive(Deserialize)]
    struct Referencias {
        #[serde(default, deserialize_with = "deserialize_id")]
        cliente_id: Option<i32>,
        #[serde(default, deserialize_with = "deserialize_id_patch")]
        transporte_id: Patch<i32>,
        #[serde(default, deserialize_with = "deserialize_bultos")]
        cant_bultos: Option<i32>,
    }

    #[test]
    fn test_reference_deserializers() {
        let r: Referencias = serde_json::from_str("{}").unwrap();
        assert_eq!(r.cliente_id, None);
        assert_eq!(r.transporte_id, Patch::Missing);
        assert_eq!(r.cant_bultos, None);

        let r: Referencias =
            serde_json::from_str(r#"{"cliente_id":"12","transporte_id":"","cant_bultos":"x"}"#).unwrap();
        assert_eq!(r.cliente_id, Some(12));
        assert_eq!(r.transporte_id, Patch::Null);
        assert_eq!(r.cant_bultos, Some(0));

        let r: Referencias = serde_json::from_str(r#"{"transporte_id":4,"cant_bultos":null}"#).unwrap();
        assert_eq!(r.transporte_id, Patch::Value(4));
        assert_eq!(r.cant_bultos, Some(0));
    }

    #[test]
    fn test_validate_enum() {
        assert!(validate_enum("cobranza", &["devolucion", "cobranza"]).is_ok());
        assert!(validate_enum("otro", &["devolucion", "cobranza"]).is_err());
    }
}
