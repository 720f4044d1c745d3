//! Tool schema and model reply shape
//!
//! One callable tool is declared to the model: `recommend_products`. The
//! model's answer is a tagged union the orchestrator pattern-matches on; an
//! invocation takes priority for downstream action, any accompanying text is
//! still shown.

use serde_json::{json, Value};

/// Name of the single declared tool.
pub const RECOMMEND_TOOL: &str = "recommend_products";

/// A structured tool invocation emitted by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocation {
    pub name: String,
    /// Parsed arguments; `{}` when the raw argument string was malformed.
    pub args: Value,
}

/// What the model answered with.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    /// Natural-language reply only.
    Text(String),
    /// Tool invocation, possibly with accompanying text.
    Invocation { text: String, call: ToolInvocation },
}

impl ModelReply {
    pub fn is_invocation(&self) -> bool {
        matches!(self, ModelReply::Invocation { .. })
    }
}

/// The `recommend_products` tool declaration in OpenAI function format.
///
/// `category` is the only required parameter; the schema enforces it on the
/// model side, the orchestrator re-checks it on arrival.
pub fn recommend_products_schema() -> Value {
    json!({
        "type": "function",
        "function": {
            "name": RECOMMEND_TOOL,
            "description": "Cuando tengas datos suficientes, pedí recomendaciones.",
            "parameters": {
                "type": "object",
                "properties": {
                    "gender":       { "type": "string", "description": "hombre | mujer | unisex" },
                    "occasion":     { "type": "string" },
                    "category":     { "type": "string" },
                    "style":        { "type": "string" },
                    "fit":          { "type": "string" },
                    "brand_pref":   { "type": "string" },
                    "brand_avoid":  { "type": "string" },
                    "colors_pref":  { "type": "string" },
                    "colors_avoid": { "type": "string" },
                    "sizes":        { "type": "string" },
                    "budget":       { "type": "string", "description": "rango libre ej. 30000-120000" },
                    "budget_max":   { "type": "number", "description": "tope numérico si el usuario lo indicó" },
                    "notes":        { "type": "string" }
                },
                "required": ["category"]
            }
        }
    })
}
