//! Bundled example diagrams

use std::str::FromStr;

use crate::diagram::Diagram;
use crate::error::RenderError;

const SIMPLE_THREE_TIER: &str = include_str!("../fixtures/simple_three_tier.toml");
const MICROSERVICES_ECOMMERCE: &str = include_str!("../fixtures/microservices_ecommerce.toml");

/// The canned diagrams shipped with the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleDiagram {
    /// Browser, web server and database
    SimpleThreeTier,
    /// Clustered e-commerce platform with gateways, services and stores
    MicroservicesEcommerce,
}

impl ExampleDiagram {
    pub const ALL: [ExampleDiagram; 2] = [
        ExampleDiagram::SimpleThreeTier,
        ExampleDiagram::MicroservicesEcommerce,
    ];

    /// Canonical name, also used for snapshot and file names
    pub fn name(self) -> &'static str {
        match self {
            ExampleDiagram::SimpleThreeTier => "simple_three_tier",
            ExampleDiagram::MicroservicesEcommerce => "microservices_ecommerce",
        }
    }

    /// Build the diagram from its embedded description
    pub fn diagram(self) -> Diagram {
        let source = match self {
            ExampleDiagram::SimpleThreeTier => SIMPLE_THREE_TIER,
            ExampleDiagram::MicroservicesEcommerce => MICROSERVICES_ECOMMERCE,
        };
        Diagram::from_toml_str(source).expect("Bundled example diagrams should be valid TOML")
    }
}

impl FromStr for ExampleDiagram {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "simple" | "simplethreetier" | "threetier" => Ok(ExampleDiagram::SimpleThreeTier),
            "microservices" | "microservicesecommerce" | "ecommerce" => {
                Ok(ExampleDiagram::MicroservicesEcommerce)
            }
            _ => Err(RenderError::UnknownExample { name: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{validate, NodeShape};
    use crate::format::OutputFormat;

    #[test]
    fn test_name_aliases() {
        for name in ["simple", "Simple Three-Tier", "three_tier", "THREE-TIER"] {
            assert_eq!(name.parse::<ExampleDiagram>().unwrap(), ExampleDiagram::SimpleThreeTier);
        }
        for name in ["microservices", "Microservices E-Commerce", "ecommerce", "e-commerce"] {
            assert_eq!(
                name.parse::<ExampleDiagram>().unwrap(),
                ExampleDiagram::MicroservicesEcommerce
            );
        }
        assert!("monolith".parse::<ExampleDiagram>().is_err());
    }

    #[test]
    fn test_simple_three_tier_contents() {
        let diagram = ExampleDiagram::SimpleThreeTier.diagram();
        assert_eq!(diagram.title, "Basic Three-Tier Web Application");
        assert_eq!(diagram.nodes.len(), 3);
        assert_eq!(diagram.edges.len(), 2);
        assert!(diagram.clusters.is_empty());
        assert_eq!(diagram.node("database").map(|n| n.shape), Some(NodeShape::Cylinder));
    }

    #[test]
    fn test_microservices_contents() {
        let diagram = ExampleDiagram::MicroservicesEcommerce.diagram();
        assert_eq!(diagram.title, "Microservices E-Commerce Platform");
        assert_eq!(diagram.nodes.len(), 13);
        assert_eq!(diagram.edges.len(), 14);
        let names: Vec<&str> = diagram.clusters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["client", "api", "services", "data", "infra"]);
    }

    #[test]
    fn test_examples_valid_in_every_format() {
        for example in ExampleDiagram::ALL {
            let diagram = example.diagram();
            for format in OutputFormat::ALL {
                assert!(
                    validate(&diagram, format).is_ok(),
                    "{} invalid for {}",
                    example.name(),
                    format
                );
            }
        }
    }
}
