use super::model::{CambiosCliente, Campo, Cliente};
use crate::error::Result;

/// When a field sent in an update replaces the stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Politica {
    /// Replace only with a non-empty value; empty strings keep the stored one
    SiNoVacio,
    /// Replace whenever the field was sent, empty string included
    SiPresente,
}

/// Per-field merge policy. `empresa` is the only field that can be cleared.
pub const POLITICAS: [(Campo, Politica); 7] = [
    (Campo::Nombre, Politica::SiNoVacio),
    (Campo::Correo, Politica::SiNoVacio),
    (Campo::Telefono, Politica::SiNoVacio),
    (Campo::Empresa, Politica::SiPresente),
    (Campo::Pais, Politica::SiNoVacio),
    (Campo::FechaContacto, Politica::SiNoVacio),
    (Campo::EstadoCliente, Politica::SiNoVacio),
];

pub fn politica(campo: Campo) -> Politica {
    POLITICAS
        .iter()
        .find(|(c, _)| *c == campo)
        .map(|(_, p)| *p)
        .unwrap_or(Politica::SiNoVacio)
}

/// Value an update would write for `campo`, if any
pub fn valor_efectivo(cambios: &CambiosCliente, campo: Campo) -> Option<&str> {
    let valor = cambios.get(campo)?;
    match politica(campo) {
        Politica::SiPresente => Some(valor),
        Politica::SiNoVacio if valor.is_empty() => None,
        Politica::SiNoVacio => Some(valor),
    }
}

/// Merge an update over a stored record. The id is never touched.
pub fn aplicar(actual: &Cliente, cambios: &CambiosCliente) -> Result<Cliente> {
    let mut merged = actual.clone();
    for (campo, _) in POLITICAS {
        if let Some(valor) = valor_efectivo(cambios, campo) {
            campo.escribir(&mut merged, valor.to_string())?;
        }
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cliente::model::EstadoCliente;

    fn stored() -> Cliente {
        Cliente {
            id: "cliente-id".into(),
            nombre: "Nicolas Avila".into(),
            correo: "NicoAv@gmail.com".into(),
            telefono: "+34-342-456-789".into(),
            empresa: "Universidad del Valle".into(),
            pais: "España".into(),
            fecha_contacto: "2023-08-15".into(),
            estado_cliente: EstadoCliente::Nuevo,
        }
    }

    #[test]
    fn every_field_has_a_policy() {
        for campo in Campo::ALL {
            assert!(POLITICAS.iter().any(|(c, _)| *c == campo), "{campo:?}");
        }
        assert_eq!(politica(Campo::Empresa), Politica::SiPresente);
    }

    #[test]
    fn absent_fields_are_kept() {
        let cambios = CambiosCliente::new().with(Campo::Pais, "Chile");
        let merged = aplicar(&stored(), &cambios).unwrap();

        assert_eq!(merged.pais, "Chile");
        assert_eq!(merged.nombre, "Nicolas Avila");
        assert_eq!(merged.empresa, "Universidad del Valle");
        assert_eq!(merged.id, "cliente-id");
    }

    #[test]
    fn empty_strings_keep_stored_value_except_empresa() {
        let cambios = CambiosCliente::new()
            .with(Campo::Nombre, "")
            .with(Campo::Correo, "")
            .with(Campo::Empresa, "");
        let merged = aplicar(&stored(), &cambios).unwrap();

        assert_eq!(merged.nombre, "Nicolas Avila");
        assert_eq!(merged.correo, "NicoAv@gmail.com");
        assert_eq!(merged.empresa, "");
    }

    #[test]
    fn status_is_parsed_on_merge() {
        let cambios = CambiosCliente::new().with(Campo::EstadoCliente, "Ganado");
        let merged = aplicar(&stored(), &cambios).unwrap();
        assert_eq!(merged.estado_cliente, EstadoCliente::Ganado);
    }
}
