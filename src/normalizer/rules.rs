//! Ordered keyword rules. Order is significant: several keywords can occur in
//! the same text and the first rule found in the input wins.

/// (lower-case keyword, canonical label)
pub type Rule = (&'static str, &'static str);

pub const OTHER: &str = "Outros";
pub const GENERAL_POPULATION: &str = "População em Geral";
pub const NOT_INFORMED: &str = "Não informado";

pub const FRAUD_TYPE_RULES: &[Rule] = &[
    ("pix", "Golpe do Pix"),
    ("phishing", "Phishing"),
    ("suporte técnico", "Golpe do Suporte Técnico"),
    ("investimento", "Falso Investimento"),
    ("whatsapp", "Clonagem de WhatsApp"),
    ("empréstimo", "Falso Empréstimo"),
    ("comprovante", "Falso Comprovante de Pagamento"),
    ("perfil falso", "Perfil Falso"),
    ("deepfake", "Deepfake / IA"),
    ("link", "Site Falso / Link Malicioso"),
    ("cartão", "Golpe do Cartão"),
    ("número falso", "Golpe com Número Falso"),
    ("bolsa família", "Falso Bolsa Família"),
    ("auxílio", "Golpe do Auxílio"),
    ("compra falsa", "Compra Falsa"),
];

pub const CHANNEL_RULES: &[Rule] = &[
    ("whatsapp", "WhatsApp"),
    ("sms", "SMS / Mensagens"),
    ("e-mail", "E-mail"),
    ("telefone", "Telefone"),
    ("pix", "PIX"),
    ("cartão", "Cartão de Crédito / Débito"),
    ("boletos", "Boletos"),
    ("rede social", "Redes Sociais"),
    ("e-commerce", "E-commerce / Plataformas Online"),
    ("máquina de cartão", "Máquina de Cartão"),
    ("dns", "Manipulação de DNS"),
    ("inteligência artificial", "IA / Deepfake"),
    ("diversos", "Diversos"),
];

pub const AUDIENCE_RULES: &[Rule] = &[
    ("idoso", "Idosos"),
    ("jovens", "Jovens"),
    ("pix", "Usuários do Pix"),
    ("whatsapp", "Usuários do WhatsApp"),
    ("internet", "Usuários de Internet"),
    ("investidor", "Investidores"),
    ("comerciante", "Comerciantes"),
    ("clientes de banco", "Clientes Bancários"),
    ("população", GENERAL_POPULATION),
    ("consumidores", "Consumidores"),
    ("instituições financeiras", "Instituições Financeiras"),
    ("empresas", "Empresas"),
    ("carnaval", "Foliões"),
];

/// Canonical labels of a rule table, in rule order, without duplicates.
pub fn labels(rules: &[Rule]) -> Vec<&'static str> {
    let mut labels: Vec<&'static str> = Vec::with_capacity(rules.len());
    for (_, label) in rules {
        if !labels.contains(label) {
            labels.push(*label);
        }
    }
    labels
}
