//! Lexer for Mermaid flowcharts using logos

use logos::Logos;

use super::{Span, VerifyError};

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    #[regex(r"```[a-z]*")]
    Fence,

    #[token("flowchart")]
    Flowchart,
    #[token("graph")]
    Graph,
    #[token("subgraph")]
    Subgraph,
    #[token("end")]
    End,
    #[token("style")]
    Style,

    #[token("-->")]
    Arrow,
    #[token("|")]
    Pipe,

    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    /// `property:value` list following a `style` statement
    #[regex(r"[a-z][a-z-]*:[^\s]+", |lex| lex.slice().to_string())]
    StyleSpec(String),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r#""[^"\n]*""#, |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_string()
    })]
    String(String),

    #[regex(r"%%[^\n]*", logos::skip)]
    Comment,
}

/// Lex a flowchart into tokens with spans, rejecting unknown characters
pub fn lex(input: &str) -> Result<Vec<(Token, Span)>, VerifyError> {
    Token::lexer(input)
        .spanned()
        .map(|(token, span)| match token {
            Ok(token) => Ok((token, span)),
            Err(()) => {
                let message = format!("unexpected input {:?}", &input[span.clone()]);
                Err(VerifyError::syntax(span, message))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            tokens("flowchart TB subgraph ending end"),
            vec![
                Token::Flowchart,
                Token::Ident("TB".to_string()),
                Token::Subgraph,
                Token::Ident("ending".to_string()),
                Token::End,
            ]
        );
    }

    #[test]
    fn test_node_and_edge() {
        assert_eq!(
            tokens(r#"db[("Data #35; store")] db -->|"reads"| api"#),
            vec![
                Token::Ident("db".to_string()),
                Token::LBracket,
                Token::LParen,
                Token::String("Data #35; store".to_string()),
                Token::RParen,
                Token::RBracket,
                Token::Ident("db".to_string()),
                Token::Arrow,
                Token::Pipe,
                Token::String("reads".to_string()),
                Token::Pipe,
                Token::Ident("api".to_string()),
            ]
        );
    }

    #[test]
    fn test_comments_skipped_and_fences_lexed() {
        assert_eq!(
            tokens("```mermaid\nflowchart LR\n    %% a title: with \"quotes\"\n```"),
            vec![
                Token::Fence,
                Token::Flowchart,
                Token::Ident("LR".to_string()),
                Token::Fence,
            ]
        );
    }

    #[test]
    fn test_style_spec() {
        assert_eq!(
            tokens("style a fill:#e1f5ff"),
            vec![
                Token::Style,
                Token::Ident("a".to_string()),
                Token::StyleSpec("fill:#e1f5ff".to_string()),
            ]
        );
    }

    #[test]
    fn test_unknown_character_is_an_error() {
        let err = lex("a --> b;").unwrap_err();
        assert!(matches!(err, VerifyError::Syntax { span, .. } if span == (7..8)));
    }
}
