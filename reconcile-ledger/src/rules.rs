//! Vendor and account rule tables.
//!
//! Both tables are ordered lists. Declaration order is the tie-break when more
//! than one rule matches a description: the first rule wins. Patterns are
//! regexes matched case-insensitively anywhere in the description.

use std::fs;
use std::path::{Path, PathBuf};

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use reconcile_core::{MISC_ACCOUNT_CODE, MISC_VENDOR_CODE, MISC_VENDOR_NAME};

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("invalid pattern {pattern:?} in {table} rule {code}: {source}")]
    InvalidPattern {
        table: &'static str,
        code: u32,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("vendor code {0} is declared more than once")]
    DuplicateVendor(u32),

    #[error("account code {0} is declared more than once")]
    DuplicateAccount(u32),

    #[error("catch-all vendor {code} is missing from the vendor table", code = MISC_VENDOR_CODE)]
    MissingCatchAll,

    #[error("catch-all vendor {code} must not have patterns", code = MISC_VENDOR_CODE)]
    CatchAllHasPatterns,

    #[error("failed to read rules file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Vendor rule as declared (in code or in a rules file)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorRuleDef {
    pub code: u32,
    pub name: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    pub default_account: Option<u32>,
}

/// Account rule as declared (in code or in a rules file)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRuleDef {
    pub code: u32,
    pub patterns: Vec<String>,
}

/// On-disk shape of a rules file: `[[vendors]]` and `[[accounts]]` arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub vendors: Vec<VendorRuleDef>,
    #[serde(default)]
    pub accounts: Vec<AccountRuleDef>,
}

#[derive(Debug, Clone)]
pub struct VendorRule {
    pub code: u32,
    pub name: String,
    pub default_account: Option<u32>,
    patterns: Vec<Regex>,
}

impl VendorRule {
    pub fn is_catch_all(&self) -> bool {
        self.code == MISC_VENDOR_CODE
    }

    pub fn matches(&self, description: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(description))
    }
}

#[derive(Debug, Clone)]
pub struct AccountRule {
    pub code: u32,
    patterns: Vec<Regex>,
}

impl AccountRule {
    pub fn matches(&self, description: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(description))
    }
}

/// Read-only classification tables, built once per run.
#[derive(Debug, Clone)]
pub struct RuleTables {
    vendors: Vec<VendorRule>,
    accounts: Vec<AccountRule>,
}

impl RuleTables {
    /// Compile and validate a rule set.
    pub fn new(set: RuleSet) -> Result<Self, RuleError> {
        let mut vendors: Vec<VendorRule> = Vec::with_capacity(set.vendors.len());
        for def in set.vendors {
            if vendors.iter().any(|v| v.code == def.code) {
                return Err(RuleError::DuplicateVendor(def.code));
            }
            if def.code == MISC_VENDOR_CODE && !def.patterns.is_empty() {
                return Err(RuleError::CatchAllHasPatterns);
            }
            vendors.push(VendorRule {
                code: def.code,
                patterns: compile("vendor", def.code, &def.patterns)?,
                name: def.name,
                default_account: def.default_account,
            });
        }
        if !vendors.iter().any(VendorRule::is_catch_all) {
            return Err(RuleError::MissingCatchAll);
        }

        let mut accounts: Vec<AccountRule> = Vec::with_capacity(set.accounts.len());
        for def in set.accounts {
            if accounts.iter().any(|a| a.code == def.code) {
                return Err(RuleError::DuplicateAccount(def.code));
            }
            accounts.push(AccountRule {
                code: def.code,
                patterns: compile("account", def.code, &def.patterns)?,
            });
        }

        Ok(Self { vendors, accounts })
    }

    /// The built-in tables for the operator's checking account.
    pub fn builtin() -> Result<Self, RuleError> {
        Self::new(builtin_rule_set())
    }

    pub fn from_toml(toml_content: &str) -> Result<Self, RuleError> {
        let set: RuleSet = toml::from_str(toml_content)?;
        Self::new(set)
    }

    pub fn from_file(path: &Path) -> Result<Self, RuleError> {
        let content = fs::read_to_string(path).map_err(|source| RuleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Vendor rules in declaration order, catch-all included.
    pub fn vendors(&self) -> &[VendorRule] {
        &self.vendors
    }

    /// Account rules in declaration order.
    pub fn accounts(&self) -> &[AccountRule] {
        &self.accounts
    }

    pub fn vendor(&self, code: u32) -> Option<&VendorRule> {
        self.vendors.iter().find(|v| v.code == code)
    }

    /// Display name of the catch-all vendor.
    pub fn catch_all_name(&self) -> &str {
        self.vendor(MISC_VENDOR_CODE)
            .map(|v| v.name.as_str())
            .unwrap_or(MISC_VENDOR_NAME)
    }
}

fn compile(table: &'static str, code: u32, patterns: &[String]) -> Result<Vec<Regex>, RuleError> {
    patterns
        .iter()
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .map_err(|source| RuleError::InvalidPattern {
                    table,
                    code,
                    pattern: p.clone(),
                    source,
                })
        })
        .collect()
}

type VendorRow = (u32, &'static str, &'static [&'static str], Option<u32>);
type AccountRow = (u32, &'static [&'static str]);

const VENDORS: &[VendorRow] = &[
    (100, "Tampa International Airport", &[r"tampa.*int.*airpor"], Some(374)),
    (101, "Epcor Water (1)", &[r"epcor.*water.*usa", r"epcor.*water.*\(usa\)"], Some(352)),
    (102, "Epcor Water (2)", &[r"epcor.*water.*usa", r"epcor.*water.*\(usa\)"], Some(352)),
    (103, "ADT Security", &[r"adt.*security.*ser", r"adt.*security", r"adt"], Some(383)),
    (104, "American Airlines", &[r"american.*air", r"southwest", r"southwes"], Some(370)),
    (105, "HCAA Prebookpark", &[r"hcaa.*prebook", r"prebookpark"], Some(374)),
    (106, "Cox Communications", &[r"cox.*comm", r"cox.*phx"], Some(360)),
    (107, "Queen of All Saints Chapel Inc.", &[r"queen.*saints", r"seminary"], Some(210)),
    (108, "CHK ...0784", &[r"chk.*0784", r"fraser.*chase", r"check.*#", r"^\d+\s+\^"], Some(175)),
    (109, "Southwest Gas", &[r"southwest.*gas"], Some(351)),
    (MISC_VENDOR_CODE, MISC_VENDOR_NAME, &[], Some(MISC_ACCOUNT_CODE)),
    (500, "Fr. Luke Petrizzi", &[r"fr\.?\s*luke.*petrizzi", r"luke.*petrizzi"], Some(376)),
    (501, "Ron Pardini", &[r"ron.*pardini"], Some(385)),
    (502, "Fr. Nicolas Despósito", &[r"fr\.?\s*nicolas.*desp", r"nicolas.*desp"], Some(376)),
];

const ACCOUNTS: &[AccountRow] = &[
    // Travel & lodging
    (370, &[r"airline", r"airfare", r"flight", r"american.*air", r"southwest", r"southwes"]),
    (371, &[r"rental.*car", r"hertz", r"enterprise", r"budget.*rent"]),
    (372, &[r"hotel", r"inn", r"resort", r"accommodation", r"lodging", r"holiday.*inn"]),
    (373, &[
        r"taco.*bell", r"starbucks", r"peet", r"mcdonalds", r"wendy", r"culver",
        r"dunkin", r"dairy.*queen", r"tropical.*smoothie",
    ]),
    (374, &[r"parking", r"toll", r"taxi", r"uber", r"lyft", r"tampa.*int.*airpor"]),
    (375, &[r"fuel", r"gas.*station", r"marathon", r"circle.*k", r"wawa", r"gas.*\d+"]),
    (376, &[r"reimbursement", r"fr\.?\s*luke", r"fr\.?\s*nicolas"]),
    // Utilities
    (350, &[r"electric", r"power", r"energy"]),
    (351, &[r"natural.*gas", r"southwest.*gas"]),
    (352, &[r"water", r"sewer", r"epcor.*water"]),
    // Internet & phone
    (360, &[r"internet", r"cable", r"communications", r"century.*link", r"cox.*comm"]),
    (361, &[r"cell", r"mobile", r"phone"]),
    // Office & supplies
    (380, &[r"office", r"supplies", r"depot", r"office.*depot"]),
    (381, &[r"postage", r"ups", r"fedex", r"usps"]),
    (382, &[r"printing", r"copy", r"deluxe.*small.*bus"]),
    (383, &[
        r"subscription", r"dues", r"security.*system", r"adt.*security", r"news.*shop",
        r"phoenix.*news", r"phx.*\d+.*news", r"bay.*to.*bay.*news", r"^bay.*to.*bay.*news",
    ]),
    (384, &[r"software", r"technology"]),
    (385, &[r"church.*supplies", r"sacristy", r"autom", r"vestments"]),
    (386, &[r"vestments", r"apparel"]),
    // Building & maintenance
    (330, &[r"landscaping", r"lawn", r"garden"]),
    (331, &[r"equipment", r"appliance", r"home.*depot", r"the.*home.*depot"]),
    (332, &[r"heating", r"cooling", r"hvac"]),
    (333, &[r"electric.*repair"]),
    (334, &[r"plumbing"]),
    (335, &[r"structural", r"repair"]),
    (336, &[r"alarm"]),
    (337, &[r"waste", r"garbage", r"trash"]),
    (338, &[r"pest.*control"]),
    // Special accounts
    (175, &[r"mortgage", r"mtg", r"chk.*\d+", r"^\d+\s+\^"]),
    (201, &[r"deposit", r"collection"]),
    (210, &[r"seminary.*tax", r"tax"]),
    (301, &[r"payroll", r"salary", r"wages"]),
    (MISC_ACCOUNT_CODE, &[r"miscellaneous", r"unknown", r"ebay", r"trip.*advisor"]),
];

/// Declarations behind [`RuleTables::builtin`], in table order.
pub fn builtin_rule_set() -> RuleSet {
    RuleSet {
        vendors: VENDORS
            .iter()
            .map(|(code, name, patterns, default_account)| VendorRuleDef {
                code: *code,
                name: name.to_string(),
                patterns: patterns.iter().map(|p| p.to_string()).collect(),
                default_account: *default_account,
            })
            .collect(),
        accounts: ACCOUNTS
            .iter()
            .map(|(code, patterns)| AccountRuleDef {
                code: *code,
                patterns: patterns.iter().map(|p| p.to_string()).collect(),
            })
            .collect(),
    }
}
