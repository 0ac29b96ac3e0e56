//! Reglas pedido/entregas contra un store en memoria

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde_json::json;

use logistica_backoffice::dto::entrega_dto::{CreateEntregaRequest, UpdateEntregaRequest};
use logistica_backoffice::models::entrega::{Entrega, EntregaCambios, EntregaCreada, NuevaEntrega};
use logistica_backoffice::models::pedido::PedidoCapacidad;
use logistica_backoffice::repositories::entrega_repository::EntregaStore;
use logistica_backoffice::services::entrega_service::EntregaService;
use logistica_backoffice::utils::errors::{not_found_error, AppError, AppResult};

const ARMADOR_INEXISTENTE: i32 = 999;

#[derive(Debug, Clone)]
struct PedidoMem {
    cant_bultos: i32,
    completado: bool,
    fecha_completado: Option<NaiveDate>,
    ultimo_numero: i32,
}

#[derive(Debug, Clone)]
struct EntregaMem {
    pedido_id: i32,
    numero_entrega: i32,
    cant_bultos: i32,
    fecha_entrega: Option<NaiveDate>,
    observaciones: Option<String>,
    completado: bool,
    ok: bool,
}

#[derive(Default)]
struct Datos {
    pedidos: HashMap<i32, PedidoMem>,
    entregas: BTreeMap<i32, EntregaMem>,
    next_id: i32,
}

#[derive(Default)]
struct MemoriaStore {
    datos: Mutex<Datos>,
}

impl MemoriaStore {
    fn con_pedido(id: i32, cant_bultos: i32) -> Self {
        let store = Self::default();
        store.datos.lock().unwrap().pedidos.insert(
            id,
            PedidoMem {
                cant_bultos,
                completado: false,
                fecha_completado: None,
                ultimo_numero: 0,
            },
        );
        store
    }

    fn pedido(&self, id: i32) -> PedidoMem {
        self.datos.lock().unwrap().pedidos[&id].clone()
    }

    fn entrega(&self, id: i32) -> EntregaMem {
        self.datos.lock().unwrap().entregas[&id].clone()
    }

    fn cantidad_entregas(&self) -> usize {
        self.datos.lock().unwrap().entregas.len()
    }

    fn total_bultos(&self, pedido_id: i32) -> i32 {
        self.datos
            .lock()
            .unwrap()
            .entregas
            .values()
            .filter(|e| e.pedido_id == pedido_id)
            .map(|e| e.cant_bultos)
            .sum()
    }

    fn borrar(&self, id: i32) {
        self.datos.lock().unwrap().entregas.remove(&id);
    }
}

#[async_trait]
impl EntregaStore for MemoriaStore {
    async fn find_pedido(&self, pedido_id: i32) -> AppResult<Option<PedidoCapacidad>> {
        let datos = self.datos.lock().unwrap();
        Ok(datos.pedidos.get(&pedido_id).map(|p| PedidoCapacidad {
            id: pedido_id,
            cant_bultos: p.cant_bultos,
            completado: p.completado,
        }))
    }

    async fn find_entrega(&self, id: i32) -> AppResult<Option<Entrega>> {
        let datos = self.datos.lock().unwrap();
        Ok(datos.entregas.get(&id).map(|e| Entrega {
            id,
            pedido_id: e.pedido_id,
            numero_entrega: e.numero_entrega,
            cant_bultos: e.cant_bultos,
            direccion_entrega: None,
            armador_id: None,
            tipo_transporte_id: None,
            transporte_id: None,
            estado_id: None,
            fecha_entrega: e.fecha_entrega,
            observaciones: e.observaciones.clone(),
            completado: e.completado,
            ok: e.ok,
            created_at: Utc::now(),
            comprobante: None,
            armador_nombre: None,
            transporte_nombre: None,
            estado_nombre: None,
        }))
    }

    async fn sum_bultos(&self, pedido_id: i32, excluir: Option<i32>) -> AppResult<i64> {
        let datos = self.datos.lock().unwrap();
        Ok(datos
            .entregas
            .iter()
            .filter(|(id, e)| e.pedido_id == pedido_id && Some(**id) != excluir)
            .map(|(_, e)| i64::from(e.cant_bultos))
            .sum())
    }

    async fn insert(&self, nueva: NuevaEntrega) -> AppResult<EntregaCreada> {
        let mut datos = self.datos.lock().unwrap();
        // Igual que la FK de la base: un armador inexistente rechaza el alta
        if nueva.armador_id == Some(ARMADOR_INEXISTENTE) {
            return Err(AppError::BadRequest(format!(
                "Referencia inexistente: armador {}",
                ARMADOR_INEXISTENTE
            )));
        }
        let maximo = datos
            .entregas
            .values()
            .filter(|e| e.pedido_id == nueva.pedido_id)
            .map(|e| e.numero_entrega)
            .max()
            .unwrap_or(0);
        let pedido = datos
            .pedidos
            .get_mut(&nueva.pedido_id)
            .ok_or_else(|| not_found_error("Pedido", nueva.pedido_id))?;
        pedido.ultimo_numero = pedido.ultimo_numero.max(maximo) + 1;
        let numero_entrega = pedido.ultimo_numero;

        datos.next_id += 1;
        let id = datos.next_id;
        datos.entregas.insert(
            id,
            EntregaMem {
                pedido_id: nueva.pedido_id,
                numero_entrega,
                cant_bultos: nueva.cant_bultos,
                fecha_entrega: nueva.fecha_entrega,
                observaciones: nueva.observaciones,
                completado: nueva.completado,
                ok: nueva.ok,
            },
        );
        Ok(EntregaCreada { id, numero_entrega })
    }

    async fn update(&self, id: i32, cambios: EntregaCambios) -> AppResult<()> {
        let mut datos = self.datos.lock().unwrap();
        let entrega = datos
            .entregas
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Entrega", id))?;
        if let Some(cant_bultos) = cambios.cant_bultos {
            entrega.cant_bultos = cant_bultos;
        }
        cambios.fecha_entrega.apply_to(&mut entrega.fecha_entrega);
        cambios.observaciones.apply_to(&mut entrega.observaciones);
        if let Some(completado) = cambios.completado {
            entrega.completado = completado;
        }
        if let Some(ok) = cambios.ok {
            entrega.ok = ok;
        }
        Ok(())
    }

    async fn set_completado(&self, id: i32, completado: bool) -> AppResult<()> {
        let mut datos = self.datos.lock().unwrap();
        let entrega = datos
            .entregas
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Entrega", id))?;
        entrega.completado = completado;
        Ok(())
    }

    async fn estados_completado(&self, pedido_id: i32) -> AppResult<Vec<bool>> {
        let datos = self.datos.lock().unwrap();
        Ok(datos
            .entregas
            .values()
            .filter(|e| e.pedido_id == pedido_id)
            .map(|e| e.completado)
            .collect())
    }

    async fn set_pedido_completado(
        &self,
        pedido_id: i32,
        completado: bool,
        hoy: NaiveDate,
    ) -> AppResult<()> {
        let mut datos = self.datos.lock().unwrap();
        let pedido = datos
            .pedidos
            .get_mut(&pedido_id)
            .ok_or_else(|| not_found_error("Pedido", pedido_id))?;
        pedido.completado = completado;
        pedido.fecha_completado = if completado {
            pedido.fecha_completado.or(Some(hoy))
        } else {
            None
        };
        Ok(())
    }
}

fn alta(pedido_id: i32, cant_bultos: i32) -> CreateEntregaRequest {
    CreateEntregaRequest {
        pedido_id: Some(pedido_id),
        cant_bultos: Some(cant_bultos),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_pedido_de_diez_bultos() {
    let service = EntregaService::new(MemoriaStore::con_pedido(1, 10));

    let primera = service.create(alta(1, 6)).await.unwrap();
    assert_eq!(service.store().entrega(primera).numero_entrega, 1);

    let err = service.create(alta(1, 5)).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert!(err.to_string().contains("11"));
    assert!(err.to_string().contains("10"));
    assert_eq!(service.store().cantidad_entregas(), 1);

    let segunda = service.create(alta(1, 4)).await.unwrap();
    assert_eq!(service.store().entrega(segunda).numero_entrega, 2);
    assert_eq!(service.store().total_bultos(1), 10);

    service.set_completado(primera, true).await.unwrap();
    assert!(!service.store().pedido(1).completado);

    service.set_completado(segunda, true).await.unwrap();
    let pedido = service.store().pedido(1);
    assert!(pedido.completado);
    assert!(pedido.fecha_completado.is_some());

    service.set_completado(primera, false).await.unwrap();
    let pedido = service.store().pedido(1);
    assert!(!pedido.completado);
    assert_eq!(pedido.fecha_completado, None);
}

#[tokio::test]
async fn test_alta_sin_pedido_existente() {
    let service = EntregaService::new(MemoriaStore::con_pedido(1, 10));

    let err = service.create(alta(99, 1)).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(service.store().cantidad_entregas(), 0);
}

#[tokio::test]
async fn test_alta_sin_pedido_id() {
    let service = EntregaService::new(MemoriaStore::con_pedido(1, 10));

    let err = service.create(CreateEntregaRequest::default()).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(service.store().cantidad_entregas(), 0);
}

#[tokio::test]
async fn test_numeracion_no_reutiliza_borrados() {
    let service = EntregaService::new(MemoriaStore::con_pedido(1, 10));

    let ids = [
        service.create(alta(1, 1)).await.unwrap(),
        service.create(alta(1, 1)).await.unwrap(),
        service.create(alta(1, 1)).await.unwrap(),
    ];
    service.store().borrar(ids[2]);

    let nueva = service.create(alta(1, 1)).await.unwrap();
    assert_eq!(service.store().entrega(nueva).numero_entrega, 4);
}

#[tokio::test]
async fn test_alta_rechazada_no_consume_numero() {
    let service = EntregaService::new(MemoriaStore::con_pedido(1, 10));

    let con_armador_invalido = CreateEntregaRequest {
        armador_id: Some(ARMADOR_INEXISTENTE),
        ..alta(1, 2)
    };
    let err = service.create(con_armador_invalido).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(service.store().cantidad_entregas(), 0);

    let id = service.create(alta(1, 2)).await.unwrap();
    assert_eq!(service.store().entrega(id).numero_entrega, 1);
}

#[tokio::test]
async fn test_numeracion_independiente_por_pedido() {
    let store = MemoriaStore::con_pedido(1, 10);
    store.datos.lock().unwrap().pedidos.insert(
        2,
        PedidoMem { cant_bultos: 5, completado: false, fecha_completado: None, ultimo_numero: 0 },
    );
    let service = EntregaService::new(store);

    service.create(alta(1, 2)).await.unwrap();
    service.create(alta(1, 2)).await.unwrap();
    let otra = service.create(alta(2, 2)).await.unwrap();
    assert_eq!(service.store().entrega(otra).numero_entrega, 1);
}

#[tokio::test]
async fn test_actualizar_cantidad_revalida_capacidad() {
    let service = EntregaService::new(MemoriaStore::con_pedido(1, 10));
    let a = service.create(alta(1, 6)).await.unwrap();
    let b = service.create(alta(1, 4)).await.unwrap();

    let excedida = UpdateEntregaRequest { cant_bultos: Some(5), ..Default::default() };
    let err = service.update(b, excedida).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(service.store().entrega(b).cant_bultos, 4);

    let menor = UpdateEntregaRequest { cant_bultos: Some(2), ..Default::default() };
    service.update(a, menor).await.unwrap();
    assert_eq!(service.store().entrega(a).cant_bultos, 2);

    // Ahora entran 8 en la segunda
    let mayor = UpdateEntregaRequest { cant_bultos: Some(8), ..Default::default() };
    service.update(b, mayor).await.unwrap();
    assert_eq!(service.store().total_bultos(1), 10);
}

#[tokio::test]
async fn test_actualizar_sin_cambiar_cantidad_no_valida() {
    let store = MemoriaStore::con_pedido(1, 10);
    let service = EntregaService::new(store);
    let id = service.create(alta(1, 10)).await.unwrap();

    // El pedido baja de capacidad por fuera de las reglas de entregas
    service.store().datos.lock().unwrap().pedidos.get_mut(&1).unwrap().cant_bultos = 3;

    let request: UpdateEntregaRequest =
        serde_json::from_value(json!({ "cant_bultos": 10, "observaciones": "frágil" })).unwrap();
    service.update(id, request).await.unwrap();
    assert_eq!(service.store().entrega(id).observaciones.as_deref(), Some("frágil"));
}

#[tokio::test]
async fn test_actualizar_entrega_inexistente() {
    let service = EntregaService::new(MemoriaStore::con_pedido(1, 10));
    let err = service
        .update(42, UpdateEntregaRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = service.set_completado(42, true).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_fecha_normalizada_y_nula() {
    let service = EntregaService::new(MemoriaStore::con_pedido(1, 10));

    let request: CreateEntregaRequest = serde_json::from_value(json!({
        "pedido_id": 1,
        "cant_bultos": 2,
        "fecha_entrega": "2024-05-03T23:30:00-03:00"
    }))
    .unwrap();
    let id = service.create(request).await.unwrap();
    assert_eq!(
        service.store().entrega(id).fecha_entrega,
        NaiveDate::from_ymd_opt(2024, 5, 3)
    );

    let limpiar: UpdateEntregaRequest =
        serde_json::from_value(json!({ "fecha_entrega": null })).unwrap();
    service.update(id, limpiar).await.unwrap();
    assert_eq!(service.store().entrega(id).fecha_entrega, None);

    let invalida: UpdateEntregaRequest =
        serde_json::from_value(json!({ "fecha_entrega": "mañana" })).unwrap();
    assert!(matches!(
        service.update(id, invalida).await.unwrap_err(),
        AppError::BadRequest(_)
    ));
}

#[tokio::test]
async fn test_cantidad_invalida_se_toma_como_cero() {
    let service = EntregaService::new(MemoriaStore::con_pedido(1, 0));

    let request: CreateEntregaRequest =
        serde_json::from_value(json!({ "pedido_id": "1", "cant_bultos": "abc" })).unwrap();
    let id = service.create(request).await.unwrap();
    assert_eq!(service.store().entrega(id).cant_bultos, 0);

    let negativa: CreateEntregaRequest =
        serde_json::from_value(json!({ "pedido_id": 1, "cant_bultos": -3 })).unwrap();
    let id = service.create(negativa).await.unwrap();
    assert_eq!(service.store().entrega(id).cant_bultos, 0);
}

#[tokio::test]
async fn test_completar_pedido_con_entregas_pendientes() {
    let service = EntregaService::new(MemoriaStore::con_pedido(1, 10));
    let a = service.create(alta(1, 5)).await.unwrap();
    service.create(alta(1, 5)).await.unwrap();
    service.set_completado(a, true).await.unwrap();

    let err = service.set_pedido_completado(1, true).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert_eq!(err.to_string(), "No se puede completar el pedido: 1 de 2 entregas están pendientes");
    assert!(!service.store().pedido(1).completado);
}

#[tokio::test]
async fn test_completar_y_reabrir_pedido_directo() {
    let service = EntregaService::new(MemoriaStore::con_pedido(1, 10));

    // Sin entregas se puede completar directamente
    service.set_pedido_completado(1, true).await.unwrap();
    let pedido = service.store().pedido(1);
    assert!(pedido.completado);
    assert!(pedido.fecha_completado.is_some());

    service.set_pedido_completado(1, false).await.unwrap();
    let pedido = service.store().pedido(1);
    assert!(!pedido.completado);
    assert_eq!(pedido.fecha_completado, None);

    let err = service.set_pedido_completado(7, true).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
