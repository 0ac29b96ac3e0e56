use serde::Deserialize;
use validator::Validate;

use crate::utils::patch::Patch;

// Filtro de catálogos con bandera `activo`
#[derive(Debug, Default, Deserialize)]
pub struct CatalogoFiltro {
    pub nombre: Option<String>,
    pub activo: Option<bool>,
}

// Filtro de catálogos sin bandera `activo`
#[derive(Debug, Default, Deserialize)]
pub struct NombreFiltro {
    pub nombre: Option<String>,
}

// --- Clientes ---

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClienteRequest {
    pub codigo: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub nombre: String,
    pub direccion: Option<String>,
    pub localidad: Option<String>,
    pub telefono: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateClienteRequest {
    #[serde(default)]
    pub codigo: Patch<String>,
    #[validate(length(min = 1, max = 200))]
    pub nombre: Option<String>,
    #[serde(default)]
    pub direccion: Patch<String>,
    #[serde(default)]
    pub localidad: Patch<String>,
    #[serde(default)]
    pub telefono: Patch<String>,
    #[serde(default)]
    pub email: Patch<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClienteFiltro {
    pub nombre: Option<String>,
    pub codigo: Option<String>,
    pub localidad: Option<String>,
}

// --- Armadores ---

#[derive(Debug, Deserialize, Validate)]
pub struct CreateArmadorRequest {
    #[validate(length(min = 1, max = 100))]
    pub nombre: String,
    pub apellido: Option<String>,
    pub activo: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateArmadorRequest {
    #[validate(length(min = 1, max = 100))]
    pub nombre: Option<String>,
    #[serde(default)]
    pub apellido: Patch<String>,
    pub activo: Option<bool>,
}

// --- Vendedores ---

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVendedorRequest {
    #[validate(length(min = 1, max = 100))]
    pub nombre: String,
    pub apellido: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub activo: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVendedorRequest {
    #[validate(length(min = 1, max = 100))]
    pub nombre: Option<String>,
    #[serde(default)]
    pub apellido: Patch<String>,
    #[serde(default)]
    pub email: Patch<String>,
    #[serde(default)]
    pub telefono: Patch<String>,
    pub activo: Option<bool>,
}

// --- Transportes ---

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTransporteRequest {
    #[validate(length(min = 1, max = 100))]
    pub nombre: String,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub activo: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTransporteRequest {
    #[validate(length(min = 1, max = 100))]
    pub nombre: Option<String>,
    #[serde(default)]
    pub telefono: Patch<String>,
    #[serde(default)]
    pub direccion: Patch<String>,
    pub activo: Option<bool>,
}

// --- Tipos de transporte ---

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTipoTransporteRequest {
    #[validate(length(min = 1, max = 100))]
    pub nombre: String,
    pub descripcion: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTipoTransporteRequest {
    #[validate(length(min = 1, max = 100))]
    pub nombre: Option<String>,
    #[serde(default)]
    pub descripcion: Patch<String>,
}

// --- Estados ---

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEstadoRequest {
    #[validate(length(min = 1, max = 100))]
    pub nombre: String,
    pub descripcion: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateEstadoRequest {
    #[validate(length(min = 1, max = 100))]
    pub nombre: Option<String>,
    #[serde(default)]
    pub descripcion: Patch<String>,
    #[serde(default)]
    pub color: Patch<String>,
}
