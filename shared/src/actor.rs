/// Who plays a side, derived from the side's configured model identifier.
/// `"human"` and `"cpu"` are reserved identifiers; anything else names an
/// external language model the server queries for the move.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Actor {
    Human,
    Cpu,
    Model(String),
}

impl Actor {
    pub fn parse(identifier: &str) -> Self {
        match identifier {
            "human" => Actor::Human,
            "cpu" => Actor::Cpu,
            _ => Actor::Model(identifier.to_string()),
        }
    }

    /// Automated actors have their turns driven by the client without human
    /// input: the built-in opponent and external models.
    pub fn is_automated(&self) -> bool {
        !matches!(self, Actor::Human)
    }

    /// The identifier used to label this actor's moves.
    pub fn label(&self) -> &str {
        match self {
            Actor::Human => "human",
            Actor::Cpu => "cpu",
            Actor::Model(name) => name,
        }
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
