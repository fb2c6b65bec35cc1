//! Reader for Mermaid flowcharts, a chumsky grammar over the logos tokens

use chumsky::error::{RichPattern, RichReason};
use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use super::lexer::{lex, Token};
use super::{GraphSummary, VerifyError};

#[derive(Debug, Clone)]
enum Statement {
    Cluster { name: String, body: Vec<Statement> },
    Node(String),
    Edge(String, String),
    Style,
}

pub(super) fn summarize(text: &str) -> Result<GraphSummary, VerifyError> {
    let len = text.len();
    let tokens = lex(text)?;

    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));
    let token_stream = Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s));

    let statements = document_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| match errs.into_iter().next() {
            Some(err) => syntax_error(err),
            None => VerifyError::syntax(len..len, "invalid flowchart"),
        })?;

    let mut summary = GraphSummary::default();
    collect(statements, &mut summary);
    Ok(summary)
}

fn collect(statements: Vec<Statement>, summary: &mut GraphSummary) {
    for statement in statements {
        match statement {
            Statement::Cluster { name, body } => {
                summary.clusters.insert(name);
                collect(body, summary);
            }
            Statement::Node(id) => {
                summary.nodes.insert(id);
            }
            Statement::Edge(from, to) => summary.add_edge(from, to),
            Statement::Style => {}
        }
    }
}

fn closing(open: &Token) -> Token {
    match open {
        Token::LBracket => Token::RBracket,
        Token::LParen => Token::RParen,
        _ => Token::RBrace,
    }
}

fn document_parser<'a, I>() -> impl Parser<'a, I, Vec<Statement>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let ident = select! { Token::Ident(s) => s };
    let string = select! { Token::String(s) => s };

    // `["label"]`, `[("label")]`, `{{"label"}}` and friends
    let open = choice((
        just(Token::LBracket),
        just(Token::LParen),
        just(Token::LBrace),
    ));
    let close = choice((
        just(Token::RBracket),
        just(Token::RParen),
        just(Token::RBrace),
    ));
    let shape = open
        .repeated()
        .at_least(1)
        .at_most(2)
        .collect::<Vec<_>>()
        .then_ignore(string.clone())
        .then(close.repeated().at_least(1).at_most(2).collect::<Vec<_>>())
        .try_map(|(opens, closes), span| {
            let mirrored = opens.len() == closes.len()
                && opens.iter().rev().map(closing).eq(closes.iter().cloned());
            if mirrored {
                Ok(())
            } else {
                Err(Rich::custom(span, "mismatched closing shape delimiter"))
            }
        });

    let node_ref = ident.clone().then_ignore(shape.or_not());

    let edge_label = just(Token::Pipe)
        .ignore_then(string.clone())
        .then_ignore(just(Token::Pipe));

    let node_or_edge = node_ref
        .clone()
        .then(
            just(Token::Arrow)
                .ignore_then(edge_label.or_not())
                .ignore_then(node_ref.clone())
                .or_not(),
        )
        .map(|(from, to)| match to {
            Some(to) => Statement::Edge(from, to),
            None => Statement::Node(from),
        });

    let style = just(Token::Style)
        .ignore_then(ident.clone())
        .then_ignore(select! { Token::StyleSpec(spec) => spec })
        .to(Statement::Style);

    let statement = recursive(|stmt| {
        let cluster = just(Token::Subgraph)
            .ignore_then(ident.clone())
            .then_ignore(
                string
                    .clone()
                    .delimited_by(just(Token::LBracket), just(Token::RBracket))
                    .or_not(),
            )
            .then(stmt.repeated().collect::<Vec<_>>())
            .then_ignore(just(Token::End))
            .map(|(name, body)| Statement::Cluster { name, body });

        choice((cluster, style, node_or_edge))
    });

    let body = choice((just(Token::Flowchart), just(Token::Graph)))
        .ignore_then(ident)
        .ignore_then(statement.repeated().collect::<Vec<_>>());

    choice((
        body.clone()
            .delimited_by(just(Token::Fence), just(Token::Fence)),
        body,
    ))
    .then_ignore(end())
}

/// Turn the first parse failure into a [`VerifyError::Syntax`]
fn syntax_error(err: Rich<'_, Token>) -> VerifyError {
    let mut message = match err.reason() {
        RichReason::ExpectedFound { found, .. } => match found {
            Some(tok) => format!("unexpected {}", format_token(tok)),
            None => "unexpected end of input".to_string(),
        },
        RichReason::Custom(msg) => msg.to_string(),
    };

    let expected: Vec<String> = err
        .expected()
        .filter_map(|e| match e {
            RichPattern::Token(tok) => Some(format_token(tok)),
            RichPattern::Label(label) => Some(label.to_string()),
            RichPattern::EndOfInput => Some("end of input".to_string()),
            RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
            RichPattern::Any => Some("any token".to_string()),
            RichPattern::SomethingElse => None,
        })
        .collect();
    if !expected.is_empty() {
        message = format!("{}, expected {}", message, expected.join(" or "));
    }

    VerifyError::syntax(err.span().into_range(), message)
}

fn format_token(tok: &Token) -> String {
    match tok {
        Token::Ident(s) => format!("identifier '{}'", s),
        Token::String(s) => format!("string \"{}\"", s),
        Token::StyleSpec(s) => format!("style '{}'", s),
        Token::Fence => "code fence".to_string(),
        Token::Flowchart => "keyword 'flowchart'".to_string(),
        Token::Graph => "keyword 'graph'".to_string(),
        Token::Subgraph => "keyword 'subgraph'".to_string(),
        Token::End => "keyword 'end'".to_string(),
        Token::Style => "keyword 'style'".to_string(),
        Token::Arrow => "'-->'".to_string(),
        Token::Pipe => "'|'".to_string(),
        Token::LBracket => "'['".to_string(),
        Token::RBracket => "']'".to_string(),
        Token::LParen => "'('".to_string(),
        Token::RParen => "')'".to_string(),
        Token::LBrace => "'{'".to_string(),
        Token::RBrace => "'}'".to_string(),
        Token::Comment => "comment".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_nodes_edges_and_clusters() {
        let text = r##"```mermaid
flowchart TB
    %% Title

    subgraph data ["Data Layer"]
        db[("Database")]
    end

    web["Web"]

    web --> db
    web -->|"cached"| cache

    style web fill:#e1f5ff
```"##;
        let summary = summarize(text).unwrap();
        assert_eq!(summary.nodes.iter().collect::<Vec<_>>(), ["cache", "db", "web"]);
        assert!(summary.clusters.contains("data"));
        assert_eq!(
            summary.edges,
            [
                ("web".to_string(), "db".to_string()),
                ("web".to_string(), "cache".to_string()),
            ]
        );
    }

    #[test]
    fn test_unfenced_document() {
        let summary = summarize("flowchart LR\n    a{{\"Hex\"}}\n    b((\"Circle\"))").unwrap();
        assert_eq!(summary.nodes.len(), 2);
        assert!(summary.edges.is_empty());
    }

    #[test]
    fn test_nested_subgraphs() {
        let text = "flowchart TB\n    subgraph outer\n    subgraph inner\n    a\n    end\n    end";
        let summary = summarize(text).unwrap();
        assert_eq!(summary.clusters.iter().collect::<Vec<_>>(), ["inner", "outer"]);
        assert!(summary.nodes.contains("a"));
    }

    #[test]
    fn test_mismatched_delimiters() {
        let err = summarize("flowchart TB\n    a[(\"x\"]]").unwrap_err();
        assert!(matches!(err, VerifyError::Syntax { ref message, .. } if message.contains("closing")));
    }

    #[test]
    fn test_unclosed_subgraph() {
        assert!(summarize("flowchart TB\n    subgraph s\n    a[\"A\"]").is_err());
    }

    #[test]
    fn test_stray_end() {
        assert!(summarize("flowchart TB\n    end").is_err());
    }

    #[test]
    fn test_missing_header() {
        let err = summarize("a --> b").unwrap_err();
        assert!(matches!(err, VerifyError::Syntax { span, .. } if span == (0..1)));
    }

    #[test]
    fn test_error_names_found_token() {
        let err = summarize("flowchart TB\n    a --> -->").unwrap_err();
        let VerifyError::Syntax { message, .. } = err else {
            panic!("expected a syntax error");
        };
        assert!(message.contains("'-->'"), "{}", message);
    }
}
