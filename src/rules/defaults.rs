//! Built-in rule tables for Brazilian retail-bank statements.
//!
//! Patterns matched against folded text (see [`crate::normalize::fold_upper`])
//! are written in unaccented uppercase. Boilerplate and residual-noise
//! patterns run on the original line, so they spell accents out.

use crate::classify::line::NoiseReason;

/// Account-metadata and column-header markers; any hit makes a line noise.
pub const METADATA_MARKERS: &[&str] = &[
    "COOPERATIVA",
    "AGENCIA:",
    "CONTA CORRENTE",
    "CONTA:",
    "NUMERO DA CONTA",
    "EXTRATO",
    "OUVIDORIA",
    "SAC:",
    "DATA HISTORICO",
    "DATA DESCRICAO",
    "DATA LANCAMENTO",
    "DATA MOVIMENTO",
    "PERIODO:",
    "CNPJ:",
];

/// Operation and merchant-type words qualifying a line without a leading date.
/// Matched as word prefixes, so `DEB` also covers `DEBITO`.
pub const OPERATION_KEYWORDS: &[&str] = &[
    "PIX",
    "TED",
    "DOC",
    "COMPRA",
    "PAGAMENTO",
    "RECEBIMENTO",
    "LIQUID",
    "DEB",
    "CRED",
    "NACIONAIS",
    "TRANSF",
    "SAQUE",
    "DEPOSITO",
    "TARIFA",
    "BOLETO",
    "SUPERMERCADO",
    "MERCADO",
    "POSTO",
    "FARMACIA",
    "DROGARIA",
    "RESTAURANTE",
    "PADARIA",
    "LOJA",
    "UBER",
    "IFOOD",
];

pub const NOISE_PATTERNS: &[(NoiseReason, &str)] = &[
    (NoiseReason::Balance, r"\bSALDO\b"),
    (
        NoiseReason::FeeOrTax,
        r"\bTAXA\s+DE\s+JUROS\b|\bJUROS\b|\bIOF\b|\bCET\b|CUSTO\s+EFETIVO|\bENCARGOS\b",
    ),
    (
        NoiseReason::FeeOrTax,
        r"\bLIMITE\s+(?:DE\s+)?(?:CREDITO|CHEQUE|DISPONIVEL|CONTRATADO)",
    ),
    (NoiseReason::Divider, r"[-=_]{5,}|^[\s\-=_*.|]+$"),
    (NoiseReason::Divider, r"\bVALOR\s*\(R\$\)|^\s*DATA\s+(?:HIST|DESCR|LANC|MOVIM)"),
    // "AUTO POSTO TOTAL" é bandeira de combustível, não linha de total
    (
        NoiseReason::Total,
        r"^\s*(?:\d{1,2}/\d{1,2}(?:/\d{2,4})?\s+)?(?:SUB)?TOTAL\b|\b(?:SUB)?TOTAL\s+(?:DE|DO|DA|DOS|DAS|GERAL)\b|\bRESUMO\b",
    ),
];

pub const BOILERPLATE_PATTERNS: &[&str] = &[
    r"\b(?:PAGAMENTO|RECEBIMENTO)\s+PIX\b(?:\s+\d+)?",
    r"\bPIX[\s_]*(?:DEB(?:ITO)?|CRED(?:ITO)?|ENVIADO|RECEBIDO)\b(?:\s+\d+)?",
    r"\bCOMPRAS?\s+NACIONAIS\b",
    r"\bCOMPRAS?(?:\s+COM)?(?:\s+CART[AÃ]O)?(?:\s+(?:DE\s+)?(?:D[EÉ]BITO|CR[EÉ]DITO))?\b",
    r"\b(?:DOC|TED|NSU|AUT|CP|ID|SISBB)\s*[:.]?\s*\d{3,}\b",
    r"\b\d{6,}\b",
    r"\b(?:S[AÃ]O\s+PAULO|RIO\s+DE\s+JANEIRO|BELO\s+HORIZONTE|CURITIBA|PORTO\s+ALEGRE|BRAS[IÍ]LIA)\s+(?:BR|BRA)\b",
    r"\s(?:BR|BRA)\s*$",
    r"\b(?:D[EÉ]BITO|CR[EÉ]DITO)\b",
];

pub const RESIDUAL_NOISE_PATTERNS: &[&str] = &[
    r"^[\d\W_]+$",
    r"^(?:DATA|HIST[OÓ]RICO|DESCRI[CÇ][AÃ]O|VALOR|SALDO|DOCUMENTO|LAN[CÇ]AMENTOS?)\b",
    r"^(?:AG(?:[EÊ]NCIA)?|CONTA|C/C)\s*[:.]?\s*[\d\-]+$",
];

/// Ordered, first match wins. Payment processors come first so that
/// "MERCADO PAGO" is not read as a supermarket.
pub const CATEGORY_RULES: &[(&str, &str)] = &[
    (
        r"\b(?:PAGSEGURO|PAGBANK|MERCADO\s*PAGO|STONE\s+PAGAMENTOS|CIELO|GETNET|SUMUP)\b",
        "Outros",
    ),
    (
        r"\b(?:IFOOD|RAPPI|UBER\s*EATS|ZE\s+DELIVERY|AIQFOME|JAMES\s+DELIVERY)\b",
        "Alimentação",
    ),
    (r"\b(?:UBER|99\s*(?:APP|POP|TAXI)|CABIFY|INDRIVE)\b", "Transporte"),
    (
        r"\b(?:AUTO\s*POSTO|POSTO|SHELL|IPIRANGA|PETROBRAS|BR\s+MANIA|COMBUSTIVE(?:L|IS))\b",
        "Transporte",
    ),
    (
        r"\b(?:SUPERMERCADOS?|HIPERMERCADO|MERCADO|MERCEARIA|ATACADAO|ASSAI|CARREFOUR|PAO\s+DE\s+ACUCAR|HORTIFRUTI|SACOLAO|PADARIA|ACOUGUE)\b",
        "Alimentação",
    ),
    (
        r"\b(?:RESTAURANTE|LANCHONETE|PIZZARIA|CHURRASCARIA|BURGER|MCDONALDS|SUBWAY)\b",
        "Alimentação",
    ),
    (
        r"\b(?:FARMACIA|DROGARIA|DROGASIL|DROGA\s+RAIA|PAGUE\s+MENOS|PANVEL|HOSPITAL|CLINICA|LABORATORIO|UNIMED|AMIL|HAPVIDA)\b",
        "Saúde",
    ),
    (
        r"\b(?:VIVO|CLARO|TIM|OI\s+FIBRA|NET\s+SERVICOS|SKY|ENEL|SABESP|CEMIG|COPEL|CPFL|COMGAS|CONDOMINIO|ALUGUEL)\b",
        "Casa",
    ),
    (
        r"\b(?:NETFLIX|SPOTIFY|DISNEY|HBO|GLOBOPLAY|DEEZER|PRIME\s+VIDEO|YOUTUBE|CINEMARK|CINEMA|INGRESSO|STEAM)\b",
        "Lazer",
    ),
    (
        r"\b(?:ESCOLA|COLEGIO|FACULDADE|UNIVERSIDADE|CURSO|UDEMY|ALURA|COURSERA)\b",
        "Educação",
    ),
    (
        r"\b(?:SALARIO|PROLABORE|PRO\s+LABORE|HONORARIOS|FOLHA\s+DE\s+PAGAMENTO)\b",
        "Trabalho",
    ),
];

/// Recurring-service brands: streaming, productivity, cloud storage, telecom.
pub const SUBSCRIPTION_BRANDS: &[&str] = &[
    "NETFLIX",
    "SPOTIFY",
    "DISNEY+",
    "DISNEY PLUS",
    "HBO MAX",
    "GLOBOPLAY",
    "DEEZER",
    "PRIME VIDEO",
    "AMAZON PRIME",
    "YOUTUBE PREMIUM",
    "APPLE.COM/BILL",
    "ICLOUD",
    "GOOGLE ONE",
    "MICROSOFT 365",
    "OFFICE 365",
    "DROPBOX",
    "ADOBE",
    "CANVA",
    "NOTION",
    "CHATGPT",
    "OPENAI",
    "VIVO",
    "CLARO",
    "TIM",
    "OI FIBRA",
];

/// Terms a valid description never contains.
pub const VALIDATOR_BLOCKLIST: &[&str] = &[
    "saldo",
    "taxa de juros",
    "juros",
    "iof",
    "limite disponível",
    "total de",
    "total do",
    "total da",
    "total geral",
    "subtotal",
];
