use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
        }
    }

    pub fn material_name(&self) -> &'static str {
        match self {
            Rarity::Common => "Scrap Iron",
            Rarity::Uncommon => "Copper Coil",
            Rarity::Rare => "Titanium Shard",
            Rarity::Epic => "Quantum Core",
        }
    }

    /// Nominal worth of a material drop. Materials never bank as currency.
    pub fn material_value(&self) -> u32 {
        match self {
            Rarity::Common => 1,
            Rarity::Uncommon => 3,
            Rarity::Rare => 8,
            Rarity::Epic => 20,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LootKind {
    Gc,
    Material,
    DataFragment,
    TerminalBonus,
}

impl LootKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LootKind::Gc => "gc",
            LootKind::Material => "material",
            LootKind::DataFragment => "data_fragment",
            LootKind::TerminalBonus => "terminal_bonus",
        }
    }

    /// Kinds that are summed into the currency payout on a successful run.
    pub fn is_currency(&self) -> bool {
        matches!(self, LootKind::Gc | LootKind::TerminalBonus)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootItem {
    pub kind: LootKind,
    pub name: String,
    pub value: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<Rarity>,
}

impl LootItem {
    pub fn gc(value: u32) -> Self {
        Self::named(LootKind::Gc, format!("{value} GC"), value)
    }

    pub fn vault_cache(value: u32) -> Self {
        Self::named(LootKind::Gc, "Vault Cache", value)
    }

    pub fn decryption_bonus(value: u32) -> Self {
        Self::named(LootKind::Gc, "Decryption Bonus", value)
    }

    pub fn material(rarity: Rarity) -> Self {
        Self {
            kind: LootKind::Material,
            name: rarity.material_name().to_string(),
            value: rarity.material_value(),
            rarity: Some(rarity),
        }
    }

    pub fn data_fragment() -> Self {
        Self::named(LootKind::DataFragment, "Data Fragment", 1)
    }

    pub fn terminal_bonus(value: u32) -> Self {
        Self::named(LootKind::TerminalBonus, "Terminal Cache", value)
    }

    fn named<S: Into<String>>(kind: LootKind, name: S, value: u32) -> Self {
        Self {
            kind,
            name: name.into(),
            value,
            rarity: None,
        }
    }
}
