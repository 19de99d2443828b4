pub mod op;

use crate::{
    parser::{error::{kind, Error}, Parser, Parse},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// Declares a typed wrapper per token kind, so a parser can ask for "an `OpenParen`" with
/// [`Parser::try_parse`] instead of matching on [`TokenKind`] itself.
macro_rules! typed_tokens {
    ($($kind:ident)*) => {$(
        #[derive(Clone, Debug, PartialEq)]
        pub(crate) struct $kind {
            pub(crate) lexeme: String,
            pub(crate) span: Range<usize>,
        }

        impl Parse for $kind {
            fn parse(input: &mut Parser) -> Result<Self, Error> {
                let token = input.next_token()?;
                if token.kind != TokenKind::$kind {
                    return Err(Error::new(vec![token.span], kind::UnexpectedToken {
                        expected: &[TokenKind::$kind],
                        found: token.kind,
                    }));
                }

                Ok(Self { lexeme: token.lexeme.to_owned(), span: token.span })
            }
        }
    )*};
}

typed_tokens!(Name OpenParen CloseParen Int Float);
