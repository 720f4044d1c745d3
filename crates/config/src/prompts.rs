//! Prompt and message texts
//!
//! The stylist speaks es-AR. These are the fixed texts the orchestrator uses
//! for the system prompt, the opening greeting, and the canned
//! acknowledgement/apology replies.

/// System prompt sent on every model call.
pub const SYSTEM_PROMPT: &str = "Sos una stylist de moda (es-AR), amable y útil. \
Recolectá: género (hombre/mujer/unisex), ocasión, categoría, estilo, fit, \
marcas (preferidas/evitar), colores (preferidos/evitar), talles, presupuesto \
(máximo) y notas. Preguntá de a una. Si el usuario ya fijó un tope de precio \
o colores a evitar, RESPETALOS en la búsqueda. Cuando sea suficiente o el \
usuario pida ver opciones, invocá la herramienta recommend_products.";

/// Extra system instruction appended when the user explicitly asked to see
/// options but the model did not invoke the search tool.
pub const FORCED_SEARCH_INSTRUCTION: &str = "El usuario quiere ver opciones YA. \
Invocá recommend_products con los mejores valores deducidos del historial. \
Respetá presupuesto máximo y colores a evitar.";

/// Fixed opening prompt for an empty inbound message.
pub const GREETING: &str = "¡Hola! ¿Para quién es el outfit (hombre, mujer, unisex)?";

/// Acknowledgement used when the model invoked the tool without any text.
pub const SEARCH_ACK: &str = "Perfecto, voy a revisar el catálogo y traerte opciones 😉";

/// Apology when the catalog fails or everything filtered out.
pub const NO_RESULTS_APOLOGY: &str =
    "No encontré suficientes opciones con esos filtros. ¿Probamos ampliando color o presupuesto?";

/// Last-resort assistant reply; history never stores an empty turn.
pub const FALLBACK_REPLY: &str = "🙂";
