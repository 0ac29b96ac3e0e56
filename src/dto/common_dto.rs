use serde::{Deserialize, Serialize};

/// Tamaño de página cuando el cliente no envía `pageSize`
pub const DEFAULT_PAGE_SIZE: i64 = 10;

// Parámetros de paginación y orden comunes a todos los listados
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<i64>,
    /// `0`, negativo o `all` devuelve todas las filas
    pub page_size: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl ListParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// `None` significa "sin límite"
    pub fn page_size(&self, default_page_size: i64) -> Option<i64> {
        let size = match self.page_size.as_deref().map(str::trim) {
            None | Some("") => default_page_size,
            Some(raw) if raw.eq_ignore_ascii_case("all") => return None,
            Some(raw) => raw.parse::<i64>().unwrap_or(default_page_size),
        };
        (size > 0).then_some(size)
    }

    /// LIMIT y OFFSET a aplicar, o `None` si se piden todas las filas
    pub fn limit_offset(&self, default_page_size: i64) -> Option<(i64, i64)> {
        self.page_size(default_page_size)
            .map(|size| (size, (self.page() - 1).saturating_mul(size)))
    }

    pub fn is_descending(&self) -> bool {
        self.sort_order
            .as_deref()
            .map(|o| o.eq_ignore_ascii_case("desc"))
            .unwrap_or(false)
    }
}

// Response de listados: filas de la página + total sin paginar
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: i64,
}

// Response de creación
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i32,
}

// Response genérica de operaciones sin payload
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

// Bodies de los endpoints de banderas
#[derive(Debug, Deserialize)]
pub struct CompletadoRequest {
    pub completado: bool,
}

#[derive(Debug, Deserialize)]
pub struct OkRequest {
    pub ok: bool,
}

#[derive(Debug, Deserialize)]
pub struct LogisticaRequest {
    pub en_logistica: bool,
}

#[derive(Debug, Deserialize)]
pub struct RecibidoRequest {
    pub recibido: bool,
}

// Rango de fechas para reportes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RangoFechas {
    pub desde: Option<String>,
    pub hasta: Option<String>,
}
