//! Acronym repair for letter-split snake_case.
//!
//! The generic converter turns `SMSBody` into `s_m_s_body`. This table maps the
//! known split forms back (`s_m_s` → `sms`). Rules are applied in a single
//! left-to-right pass: at each position the longest matching pattern wins, and
//! equal-length matches fall back to declaration order. Rule order therefore
//! never changes the result for rules with distinct patterns.

use serde::{Deserialize, Serialize};

/// Where a pattern is allowed to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// Whole `_`-delimited segments only: starts at input start or after `_`,
    /// ends at input end or before `_`.
    #[default]
    Segment,
    /// Plain substring.
    Anywhere,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcronymRule {
    pub pattern: String,
    pub replacement: String,
    #[serde(default)]
    pub anchor: Anchor,
}

impl AcronymRule {
    pub fn segment(pattern: &str, replacement: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
            anchor: Anchor::Segment,
        }
    }

    pub fn anywhere(pattern: &str, replacement: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
            anchor: Anchor::Anywhere,
        }
    }

    fn matches_at(&self, input: &str, pos: usize) -> bool {
        if self.pattern.is_empty() || !input[pos..].starts_with(&self.pattern) {
            return false;
        }

        match self.anchor {
            Anchor::Anywhere => true,
            Anchor::Segment => {
                let bytes = input.as_bytes();
                let end = pos + self.pattern.len();
                let left_ok = pos == 0 || bytes[pos - 1] == b'_';
                let right_ok = end == bytes.len() || bytes[end] == b'_';
                left_ok && right_ok
            }
        }
    }
}

/// Two rules that can both fire at the same position.
#[derive(Debug, Clone, Serialize)]
pub struct RuleConflict {
    pub first: String,
    pub second: String,
    pub resolution: String,
}

/// (split form, repaired form)
const BUILTIN_ACRONYMS: &[(&str, &str)] = &[
    ("a_i", "ai"),
    ("a_p_i", "api"),
    ("a_p_is", "apis"),
    ("c_r_m", "crm"),
    ("c_s_a_t", "csat"),
    ("e_r_p", "erp"),
    ("f_a_q", "faq"),
    ("h_t_m_l", "html"),
    ("i_d", "id"),
    ("i_ds", "ids"),
    ("i_p", "ip"),
    ("k_p_i", "kpi"),
    ("k_p_is", "kpis"),
    ("n_p_s", "nps"),
    ("o_auth", "oauth"),
    ("r_o_i", "roi"),
    ("s_e_o", "seo"),
    ("s_k_u", "sku"),
    ("s_k_us", "skus"),
    ("s_l_a", "sla"),
    ("s_l_as", "slas"),
    ("s_m_s", "sms"),
    ("u_i", "ui"),
    ("u_r_l", "url"),
    ("u_r_ls", "urls"),
    ("u_t_m", "utm"),
    ("u_x", "ux"),
    ("v_a_t", "vat"),
];

#[derive(Debug, Clone)]
pub struct AcronymTable {
    rules: Vec<AcronymRule>,
}

impl Default for AcronymTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AcronymTable {
    pub fn builtin() -> Self {
        Self {
            rules: BUILTIN_ACRONYMS
                .iter()
                .map(|(pattern, replacement)| AcronymRule::segment(pattern, replacement))
                .collect(),
        }
    }

    pub fn with_rules(rules: Vec<AcronymRule>) -> Self {
        Self { rules }
    }

    /// Append rules after the existing ones.
    pub fn extend(&mut self, rules: impl IntoIterator<Item = AcronymRule>) {
        self.rules.extend(rules);
    }

    pub fn rules(&self) -> &[AcronymRule] {
        &self.rules
    }

    /// Repair every known acronym in `input`. Unmatched input is returned as-is.
    pub fn apply(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut pos = 0;

        while pos < input.len() {
            if let Some(rule) = self.longest_match(input, pos) {
                out.push_str(&rule.replacement);
                pos += rule.pattern.len();
                continue;
            }

            let ch_len = input[pos..].chars().next().map_or(1, char::len_utf8);
            out.push_str(&input[pos..pos + ch_len]);
            pos += ch_len;
        }

        out
    }

    fn longest_match(&self, input: &str, pos: usize) -> Option<&AcronymRule> {
        let mut best: Option<&AcronymRule> = None;
        for rule in &self.rules {
            if !rule.matches_at(input, pos) {
                continue;
            }
            if best.map_or(true, |b| rule.pattern.len() > b.pattern.len()) {
                best = Some(rule);
            }
        }
        best
    }

    /// Pairs of rules where one pattern is a prefix of the other, or where the
    /// same pattern is declared twice.
    pub fn conflicts(&self) -> Vec<RuleConflict> {
        let mut conflicts = Vec::new();

        for (i, a) in self.rules.iter().enumerate() {
            for b in &self.rules[i + 1..] {
                if a.pattern == b.pattern {
                    if a.replacement != b.replacement {
                        conflicts.push(RuleConflict {
                            first: a.pattern.clone(),
                            second: b.pattern.clone(),
                            resolution: format!(
                                "first declared wins: '{}' (ignores '{}')",
                                a.replacement, b.replacement
                            ),
                        });
                    }
                    continue;
                }

                let (short, long) = if a.pattern.len() < b.pattern.len() {
                    (a, b)
                } else {
                    (b, a)
                };
                if long.pattern.starts_with(&short.pattern) {
                    conflicts.push(RuleConflict {
                        first: short.pattern.clone(),
                        second: long.pattern.clone(),
                        resolution: format!("longest match wins: '{}'", long.pattern),
                    });
                }
            }
        }

        conflicts
    }
}
