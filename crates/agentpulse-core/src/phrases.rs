//! Localized phrase tables
//!
//! Every language defines every key, so lookups cannot miss.

use agentpulse_types::{ActionKind, Language};

/// Thought phrases the simulated agent can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThoughtKey {
    Analyzing,
    Processing,
    Optimizing,
    Generating,
    Evaluating,
    Simulating,
}

impl ThoughtKey {
    pub const ALL: [ThoughtKey; 6] = [
        ThoughtKey::Analyzing,
        ThoughtKey::Processing,
        ThoughtKey::Optimizing,
        ThoughtKey::Generating,
        ThoughtKey::Evaluating,
        ThoughtKey::Simulating,
    ];
}

/// Text fragments used to build action records
#[derive(Debug)]
pub struct ActionPhrases {
    pub create_wallet: &'static str,
    pub request_funds: &'static str,
    pub get_balance: &'static str,
    pub transfer_token: &'static str,
    pub transfer_nft: &'static str,
    pub swap_token: &'static str,
    pub to: &'static str,
}

/// Labels for the dashboard chrome
#[derive(Debug)]
pub struct UiLabels {
    pub stream_title: &'static str,
    pub thinking: &'static str,
    pub awaiting_reply: &'static str,
    pub stats_title: &'static str,
    pub earned: &'static str,
    pub spent: &'static str,
    pub nfts_owned: &'static str,
    pub tokens_owned: &'static str,
    pub transactions: &'static str,
    pub thoughts: &'static str,
    pub wallet_balance: &'static str,
    pub holdings_title: &'static str,
    pub input_placeholder: &'static str,
    pub live_on: &'static str,
}

#[derive(Debug)]
pub struct PhraseTable {
    thoughts: [&'static str; 6],
    pub actions: ActionPhrases,
    pub labels: UiLabels,
}

impl PhraseTable {
    pub fn thought(&self, key: ThoughtKey) -> &'static str {
        match key {
            ThoughtKey::Analyzing => self.thoughts[0],
            ThoughtKey::Processing => self.thoughts[1],
            ThoughtKey::Optimizing => self.thoughts[2],
            ThoughtKey::Generating => self.thoughts[3],
            ThoughtKey::Evaluating => self.thoughts[4],
            ThoughtKey::Simulating => self.thoughts[5],
        }
    }

    /// Content line for a simulated action
    pub fn action_content(&self, kind: ActionKind) -> String {
        let a = &self.actions;
        match kind {
            ActionKind::CreateWallet => format!("{} 0x453b...3432", a.create_wallet),
            ActionKind::RequestFaucetFunds => a.request_funds.to_string(),
            ActionKind::GetBalance => format!("0x4534...d342 {} 1003.45 USDC", a.get_balance),
            ActionKind::TransferToken => {
                format!("{} 100 USDC {} 0x1234...5678", a.transfer_token, a.to)
            }
            ActionKind::TransferNft => format!("{} #1234 {} 0x5678...9012", a.transfer_nft, a.to),
            ActionKind::SwapToken => format!("{} 10 ETH {} 15000 USDC", a.swap_token, a.to),
        }
    }
}

static EN: PhraseTable = PhraseTable {
    thoughts: [
        "Analyzing market trends across on-chain liquidity pools...",
        "Processing recent wallet activity...",
        "Optimizing gas usage for pending transfers...",
        "Generating a new portfolio rebalancing strategy...",
        "Evaluating risk exposure of current holdings...",
        "Simulating swap outcomes before execution...",
    ],
    actions: ActionPhrases {
        create_wallet: "Created wallet",
        request_funds: "Requested funds from the faucet",
        get_balance: "has a balance of",
        transfer_token: "Transferred",
        transfer_nft: "Transferred NFT",
        swap_token: "Swapped",
        to: "to",
    },
    labels: UiLabels {
        stream_title: "Agent Stream",
        thinking: "Agent is thinking",
        awaiting_reply: "Waiting for the agent",
        stats_title: "Agent Stats",
        earned: "Earned",
        spent: "Spent",
        nfts_owned: "NFTs owned",
        tokens_owned: "Tokens owned",
        transactions: "Transactions",
        thoughts: "Thoughts",
        wallet_balance: "Wallet balance",
        holdings_title: "Holdings",
        input_placeholder: "How can I help?",
        live_on: "Live on",
    },
};

static ES: PhraseTable = PhraseTable {
    thoughts: [
        "Analizando tendencias del mercado en pools de liquidez...",
        "Procesando la actividad reciente de la billetera...",
        "Optimizando el uso de gas para transferencias pendientes...",
        "Generando una nueva estrategia de rebalanceo...",
        "Evaluando la exposición al riesgo de los activos...",
        "Simulando resultados de intercambio antes de ejecutar...",
    ],
    actions: ActionPhrases {
        create_wallet: "Billetera creada",
        request_funds: "Fondos solicitados al faucet",
        get_balance: "tiene un saldo de",
        transfer_token: "Transferidos",
        transfer_nft: "NFT transferido",
        swap_token: "Intercambiados",
        to: "a",
    },
    labels: UiLabels {
        stream_title: "Flujo del agente",
        thinking: "El agente está pensando",
        awaiting_reply: "Esperando al agente",
        stats_title: "Estadísticas",
        earned: "Ganado",
        spent: "Gastado",
        nfts_owned: "NFTs",
        tokens_owned: "Tokens",
        transactions: "Transacciones",
        thoughts: "Pensamientos",
        wallet_balance: "Saldo",
        holdings_title: "Activos",
        input_placeholder: "¿En qué puedo ayudarte?",
        live_on: "En vivo en",
    },
};

/// Phrase table for a language
pub fn phrases(language: Language) -> &'static PhraseTable {
    match language {
        Language::En => &EN,
        Language::Es => &ES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_distinct_per_language() {
        for key in ThoughtKey::ALL {
            assert_ne!(phrases(Language::En).thought(key), phrases(Language::Es).thought(key));
        }
    }

    #[test]
    fn test_action_content_uses_connector() {
        let en = phrases(Language::En).action_content(ActionKind::SwapToken);
        assert_eq!(en, "Swapped 10 ETH to 15000 USDC");
        let es = phrases(Language::Es).action_content(ActionKind::TransferNft);
        assert_eq!(es, "NFT transferido #1234 a 0x5678...9012");
    }
}
