pub mod entrega_service;
