use serde::Serialize;

/// Personal-data processing policy shown to registrants before they consent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPolicy {
    pub title: &'static str,
    pub law: &'static str,
    pub controller: &'static str,
    pub address: &'static str,
    pub contact: &'static str,
    pub text: &'static str,
    pub updated_at: &'static str,
}

pub const DATA_POLICY: DataPolicy = DataPolicy {
    title: "Política de Tratamiento de Datos Personales",
    law: "Ley 1581 de 2012 y Decreto 1377 de 2013",
    controller: "Sembradores de Fe",
    address: "Calle 76 # 57-61, Barranquilla, Colombia",
    contact: "300 3211933",
    text: "Al registrarte en la lista de espera autorizas a Sembradores de Fe a \
recopilar tu documento de identidad, nombre, correo electrónico, teléfono y ciudad \
con el único fin de informarte sobre el lanzamiento del devocional \"Despertando con \
el Espíritu Santo\" y enviarte comunicaciones relacionadas con él. Tus datos se \
conservan de forma segura mientras dure tu suscripción o hasta que solicites su \
eliminación. Puedes conocer, actualizar, rectificar o eliminar tus datos en \
cualquier momento a través de nuestros canales oficiales. Esta autorización es \
voluntaria y se otorga al aceptar la política en el formulario de registro.",
    updated_at: "2025-01-31",
};
