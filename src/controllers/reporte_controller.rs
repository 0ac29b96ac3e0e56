use chrono::NaiveDate;
use sqlx::PgPool;

use crate::dto::common_dto::RangoFechas;
use crate::dto::reporte_dto::LogisticaResponse;
use crate::models::reporte::{Agrupado, ResumenGeneral};
use crate::repositories::devolucion_repository::DevolucionRepository;
use crate::repositories::pedido_repository::PedidoRepository;
use crate::repositories::reporte_repository::{Agrupacion, ReporteRepository};
use crate::utils::errors::{bad_request_error, AppError};
use crate::utils::validation::parse_fecha;

fn parse_rango(rango: &RangoFechas) -> Result<(Option<NaiveDate>, Option<NaiveDate>), AppError> {
    let desde = parse_fecha("desde", rango.desde.as_deref())?;
    let hasta = parse_fecha("hasta", rango.hasta.as_deref())?;

    if let (Some(d), Some(h)) = (desde, hasta) {
        if d > h {
            return Err(bad_request_error("'desde' no puede ser posterior a 'hasta'"));
        }
    }
    Ok((desde, hasta))
}

pub struct ReporteController {
    reportes: ReporteRepository,
    pedidos: PedidoRepository,
    devoluciones: DevolucionRepository,
}

impl ReporteController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            reportes: ReporteRepository::new(pool.clone()),
            pedidos: PedidoRepository::new(pool.clone()),
            devoluciones: DevolucionRepository::new(pool),
        }
    }

    pub async fn resumen(&self, rango: RangoFechas) -> Result<ResumenGeneral, AppError> {
        let (desde, hasta) = parse_rango(&rango)?;
        self.reportes.resumen(desde, hasta).await
    }

    pub async fn agrupado(
        &self,
        agrupacion: Agrupacion,
        rango: RangoFechas,
    ) -> Result<Vec<Agrupado>, AppError> {
        let (desde, hasta) = parse_rango(&rango)?;
        self.reportes.agrupado(agrupacion, desde, hasta).await
    }

    pub async fn logistica(&self) -> Result<LogisticaResponse, AppError> {
        let pedidos = self.pedidos.find_en_logistica().await?;
        let devoluciones = self.devoluciones.find_en_logistica().await?;
        Ok(LogisticaResponse { pedidos, devoluciones })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rango(desde: Option<&str>, hasta: Option<&str>) -> RangoFechas {
        RangoFechas {
            desde: desde.map(str::to_string),
            hasta: hasta.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_rango() {
        let (desde, hasta) = parse_rango(&rango(Some("2024-01-01"), Some("31/01/2024"))).unwrap();
        assert_eq!(desde, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(hasta, NaiveDate::from_ymd_opt(2024, 1, 31));

        assert_eq!(parse_rango(&rango(None, None)).unwrap(), (None, None));
    }

    #[test]
    fn test_parse_rango_invertido() {
        assert!(parse_rango(&rango(Some("2024-02-01"), Some("2024-01-01"))).is_err());
        assert!(parse_rango(&rango(Some("ayer"), None)).is_err());
    }
}
