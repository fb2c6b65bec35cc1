//! arch-diagrams demo
//!
//! Prints every bundled example diagram, plus a small custom diagram, in
//! every output format. Set `RUST_LOG=debug` to see pipeline logging, and
//! `ARCH_DIAGRAMS_STYLESHEET` to a TOML palette to override colors.

use std::env;
use std::path::PathBuf;
use std::process;

use arch_diagrams::{
    render_with_config, try_rasterize, Diagram, Edge, ExampleDiagram, Node, NodeShape,
    OutputFormat, RasterFormat, RenderConfig, Stylesheet,
};

const STYLESHEET_VAR: &str = "ARCH_DIAGRAMS_STYLESHEET";

const RULE: &str = "==================================================";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::info!("Starting arch-diagrams demo");

    let stylesheet = match env::var_os(STYLESHEET_VAR).map(PathBuf::from) {
        Some(path) => match Stylesheet::from_file(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading stylesheet '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => Stylesheet::default(),
    };
    let config = RenderConfig::new().with_stylesheet(stylesheet);

    let mut diagrams: Vec<(&str, Diagram)> = ExampleDiagram::ALL
        .iter()
        .map(|example| (example.name(), example.diagram()))
        .collect();
    diagrams.push(("custom", custom_web_application()));

    for (name, diagram) in &diagrams {
        for format in OutputFormat::ALL {
            match render_with_config(diagram, format, &config) {
                Ok(text) => {
                    println!("{}.{}:", name, format.extension());
                    println!("{}", text);
                    println!("\n{}\n", RULE);
                }
                Err(e) => {
                    eprintln!("Error rendering '{}' as {}: {}", name, format, e);
                    process::exit(1);
                }
            }
        }
    }

    let simple = ExampleDiagram::SimpleThreeTier.diagram();
    let dot = match render_with_config(&simple, OutputFormat::GraphDescription, &config) {
        Ok(dot) => dot,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    match try_rasterize(&dot, RasterFormat::Png) {
        Ok(Some(png)) => println!("Rasterized {} to {} bytes of PNG", simple.title, png.len()),
        Ok(None) => println!("Graphviz not available; DOT text above is still usable"),
        Err(e) => eprintln!("Rasterization failed: {}", e),
    }
}

fn custom_web_application() -> Diagram {
    Diagram::new("Custom Web Application")
        .with_node(Node::new("frontend", "Frontend").with_fill("#e1f5ff"))
        .with_node(Node::new("backend", "Backend API").with_fill("#fff4e1"))
        .with_node(
            Node::new("db", "Database")
                .with_fill("#ffe1f5")
                .with_shape(NodeShape::Cylinder),
        )
        .with_node(Node::new("cache", "Cache").with_fill("#e8f5e9"))
        .with_edge(Edge::new("frontend", "backend"))
        .with_edge(Edge::new("backend", "db"))
        .with_edge(Edge::new("backend", "cache"))
}
