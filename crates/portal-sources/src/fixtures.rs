//! Demo data served by [`crate::StubSource`]

use portal_core::{ContentItem, Ticket, User};
use time::{Duration, OffsetDateTime};

/// Types with a built-in demo data set
pub trait Fixture: Sized {
    fn fixtures(now: OffsetDateTime) -> Vec<Self>;
}

impl Fixture for Ticket {
    fn fixtures(now: OffsetDateTime) -> Vec<Self> {
        vec![
            Ticket::new("T-1001", "No carga el ejercicio de memoria")
                .with_status("abierto")
                .with_priority("alta")
                .with_category("Plataforma")
                .with_department("Soporte")
                .with_assignee("u-1")
                .with_requester("María Pérez", "maria@example.com")
                .created(now - Duration::hours(2)),
            Ticket::new("T-1002", "Factura duplicada en octubre")
                .with_status("en_progreso")
                .with_priority("media")
                .with_category("Facturación")
                .with_department("Administración")
                .with_assignee("u-2")
                .with_requester("Jorge Ramos", "jorge.ramos@example.com")
                .created(now - Duration::hours(20)),
            Ticket::new("T-1003", "Cambiar correo de la cuenta")
                .with_status("resuelto")
                .with_priority("baja")
                .with_category("Cuenta")
                .with_department("Soporte")
                .with_assignee("u-1")
                .with_requester("Lucía Gómez", "lucia@example.com")
                .created(now - Duration::days(1)),
            Ticket::new("T-1004", "El vídeo de atención se corta")
                .with_status("abierto")
                .with_priority("media")
                .with_category("Contenido")
                .with_department("Contenidos")
                .with_requester("Carlos Ruiz", "carlos@example.com")
                .created(now - Duration::days(3)),
            Ticket::new("T-1005", "Solicitud de informe clínico")
                .with_status("en_progreso")
                .with_priority("alta")
                .with_category("Informes")
                .with_department("Clínica")
                .with_assignee("u-3")
                .with_requester("Ana María Soto", "ana.soto@example.com")
                .created(now - Duration::days(6)),
            Ticket::new("T-1006", "No recibo el correo de acceso")
                .with_status("abierto")
                .with_priority("alta")
                .with_category("Cuenta")
                .with_department("Soporte")
                .with_requester("Pedro Díaz", "pedro@example.com")
                .created(now - Duration::days(8)),
            Ticket::new("T-1007", "Error al exportar resultados")
                .with_status("cerrado")
                .with_priority("media")
                .with_category("Plataforma")
                .with_department("Soporte")
                .with_assignee("u-2")
                .with_requester("Elena Vidal", "elena@example.com")
                .created(now - Duration::days(12)),
            Ticket::new("T-1008", "Consulta sobre licencias para colegio")
                .with_status("resuelto")
                .with_priority("baja")
                .with_category("Ventas")
                .with_department("Comercial")
                .with_assignee("u-4")
                .with_requester("Colegio San José", "direccion@sanjose.example.com")
                .created(now - Duration::days(25)),
            Ticket::new("T-1009", "La tableta no sincroniza")
                .with_status("abierto")
                .with_priority("media")
                .with_category("Dispositivos")
                .with_department("Soporte")
                .with_requester("Raúl Ortega", "raul@example.com")
                .created(now - Duration::days(33)),
            Ticket::new("T-1010", "Acceso para nuevo terapeuta")
                .with_status("cerrado")
                .with_priority("baja")
                .with_category("Cuenta")
                .with_department("Clínica")
                .with_assignee("u-3")
                .with_requester("Marta Gil", "marta.gil@example.com")
                .created(now - Duration::days(48)),
            Ticket::new("T-1011", "Resultados incorrectos en atención sostenida")
                .with_status("en_progreso")
                .with_priority("alta")
                .with_category("Plataforma")
                .with_department("Clínica")
                .with_assignee("u-1")
                .with_requester("Sofía León", "sofia@example.com")
                .created(now - Duration::days(64)),
            Ticket::new("T-1012", "Renovación anual")
                .with_status("resuelto")
                .with_priority("media")
                .with_category("Facturación")
                .with_department("Administración")
                .with_assignee("u-2")
                .with_requester("Tomás Vera", "tomas@example.com")
                .created(now - Duration::days(95)),
        ]
    }
}

impl Fixture for ContentItem {
    fn fixtures(now: OffsetDateTime) -> Vec<Self> {
        vec![
            ContentItem::new("C-1", "Primeros pasos en la plataforma")
                .with_kind("tutorial")
                .with_category("Introducción")
                .with_status("publicado")
                .with_author("Equipo de producto")
                .created(now - Duration::days(2)),
            ContentItem::new("C-2", "Demo: programa de memoria de trabajo")
                .with_kind("video")
                .with_category("Memoria")
                .with_status("publicado")
                .with_author("Dra. Soto")
                .created(now - Duration::days(5)),
            ContentItem::new("C-3", "Estimulación cognitiva tras un ictus")
                .with_kind("articulo")
                .with_category("Neurorrehabilitación")
                .with_status("publicado")
                .with_author("Dr. Herrera")
                .created(now - Duration::days(9)),
            ContentItem::new("C-4", "Configurar sesiones para pacientes")
                .with_kind("tutorial")
                .with_category("Clínica")
                .with_status("borrador")
                .with_author("Equipo de producto")
                .created(now - Duration::days(14)),
            ContentItem::new("C-5", "Demo: atención dividida")
                .with_kind("video")
                .with_category("Atención")
                .with_status("publicado")
                .with_author("Dra. Soto")
                .created(now - Duration::days(21)),
            ContentItem::new("C-6", "TDAH y entrenamiento cognitivo")
                .with_kind("articulo")
                .with_category("Atención")
                .with_status("publicado")
                .with_author("Dra. Navarro")
                .created(now - Duration::days(40)),
            ContentItem::new("C-7", "Interpretar los informes de progreso")
                .with_kind("tutorial")
                .with_category("Informes")
                .with_status("publicado")
                .with_author("Equipo clínico")
                .created(now - Duration::days(55)),
            ContentItem::new("C-8", "Demo: funciones ejecutivas")
                .with_kind("video")
                .with_category("Funciones ejecutivas")
                .with_status("borrador")
                .with_author("Dr. Herrera")
                .created(now - Duration::days(80)),
            ContentItem::new("C-9", "Deterioro cognitivo leve: guía práctica")
                .with_kind("articulo")
                .with_category("Memoria")
                .with_status("publicado")
                .with_author("Dra. Navarro")
                .created(now - Duration::days(120)),
        ]
    }
}

impl Fixture for User {
    fn fixtures(now: OffsetDateTime) -> Vec<Self> {
        vec![
            User::new("u-1", "Laura Méndez", "laura@portal.example.com")
                .with_role("soporte")
                .with_status("activo")
                .with_department("Soporte")
                .created(now - Duration::days(400)),
            User::new("u-2", "Diego Castro", "diego@portal.example.com")
                .with_role("soporte")
                .with_status("activo")
                .with_department("Administración")
                .created(now - Duration::days(380)),
            User::new("u-3", "Irene Molina", "irene@portal.example.com")
                .with_role("admin")
                .with_status("activo")
                .with_department("Clínica")
                .created(now - Duration::days(300)),
            User::new("u-4", "Pablo Serrano", "pablo@portal.example.com")
                .with_role("admin")
                .with_status("inactivo")
                .with_department("Comercial")
                .created(now - Duration::days(200)),
            User::new("u-5", "María Pérez", "maria@example.com")
                .with_role("cliente")
                .with_status("activo")
                .with_department("Clientes")
                .created(now - Duration::days(30)),
            User::new("u-6", "Carlos Ruiz", "carlos@example.com")
                .with_role("cliente")
                .with_status("activo")
                .with_department("Clientes")
                .created(now - Duration::days(12)),
            User::new("u-7", "Lucía Gómez", "lucia@example.com")
                .with_role("cliente")
                .with_status("inactivo")
                .with_department("Clientes")
                .created(now - Duration::days(4)),
            User::new("u-8", "Pedro Díaz", "pedro@example.com")
                .with_role("cliente")
                .with_status("activo")
                .with_department("Clientes")
                .created(now - Duration::hours(5)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::Record;
    use std::collections::HashSet;
    use time::macros::datetime;

    fn unique_ids<R: Record>(records: &[R]) -> bool {
        let ids: HashSet<&str> = records.iter().map(|r| r.id()).collect();
        ids.len() == records.len()
    }

    #[test]
    fn test_fixture_ids_are_unique() {
        let now = datetime!(2026-10-21 12:00 UTC);
        assert!(unique_ids(&Ticket::fixtures(now)));
        assert!(unique_ids(&ContentItem::fixtures(now)));
        assert!(unique_ids(&User::fixtures(now)));
    }

    #[test]
    fn test_fixture_statuses_are_known() {
        let now = datetime!(2026-10-21 12:00 UTC);
        for ticket in Ticket::fixtures(now) {
            let status = ticket.status.unwrap();
            assert!(Ticket::STATUSES.contains(&status.as_str()));
        }
    }

    #[test]
    fn test_ticket_fixtures_are_complete() {
        let now = datetime!(2026-10-21 12:00 UTC);
        let tickets = Ticket::fixtures(now);
        assert_eq!(tickets.len(), 12);
        assert!(tickets.iter().all(|t| t.category.is_some()
            && t.department.is_some()
            && t.requester_email.is_some()
            && t.created_at.is_some_and(|at| at < now)));
        let unassigned: Vec<&str> = tickets
            .iter()
            .filter(|t| t.assignee.is_none())
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(unassigned, vec!["T-1004", "T-1006", "T-1009"]);

        let authors = ContentItem::fixtures(now).into_iter().filter(|c| c.author.is_some());
        assert_eq!(authors.count(), 9);
    }
}
