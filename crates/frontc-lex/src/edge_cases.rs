//! Edge case tests for frontc-lex

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use frontc_util::Handler;

    use crate::{KeywordTable, Lexer, SymbolTable, TokenKind, Value};

    fn lex_all(source: &str) -> (Vec<TokenKind>, Vec<String>, Handler) {
        let keywords = KeywordTable::new();
        let mut symtab = SymbolTable::new();
        let mut handler = Handler::new();
        let tokens = {
            let mut lexer = Lexer::new(
                Cursor::new(source.as_bytes().to_vec()),
                &keywords,
                &mut symtab,
                &mut handler,
            )
            .unwrap();
            let mut out = Vec::new();
            loop {
                let token = lexer.next_token();
                let entry = symtab.entry(token.entry);
                if entry.kind == TokenKind::EndOfInput {
                    break;
                }
                out.push(token);
            }
            out
        };
        let kinds = tokens.iter().map(|t| symtab.entry(t.entry).kind).collect();
        let lexemes = tokens
            .iter()
            .map(|t| symtab.lexeme(t.entry).to_string())
            .collect();
        (kinds, lexemes, handler)
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex_all(source).0
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_empty_source() {
        assert!(kinds("").is_empty());
    }

    #[test]
    fn test_edge_whitespace_only_source() {
        assert!(kinds("   \t\t  \n\n  ").is_empty());
    }

    #[test]
    fn test_edge_single_fieldid() {
        assert_eq!(kinds("x"), vec![TokenKind::FieldId]);
    }

    #[test]
    fn test_edge_id_at_exact_twenty_chars() {
        let name = format!("bc{}", "2".repeat(18));
        assert_eq!(name.len(), 20);
        let (kinds, lexemes, handler) = lex_all(&name);
        assert_eq!(kinds, vec![TokenKind::Id]);
        assert_eq!(lexemes[0], name);
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_edge_id_one_char_over_twenty_is_truncated() {
        let name = format!("bc{}", "2".repeat(19));
        assert_eq!(name.len(), 21);
        let (kinds, lexemes, handler) = lex_all(&name);
        assert_eq!(kinds, vec![TokenKind::IdLengthExceeded]);
        assert_eq!(lexemes[0], format!("{}...", &name[..20]));
        assert!(handler.has_errors());
    }

    #[test]
    fn test_edge_funid_at_exact_thirty_chars() {
        let name = format!("_{}", "q".repeat(29));
        assert_eq!(name.len(), 30);
        let (kinds, lexemes, handler) = lex_all(&name);
        assert_eq!(kinds, vec![TokenKind::FunId]);
        assert_eq!(lexemes[0], name);
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_edge_keywords_not_fieldids() {
        let (kinds, _, _) = lex_all("if then endif");
        assert_eq!(kinds, vec![TokenKind::If, TokenKind::Then, TokenKind::EndIf]);
    }

    #[test]
    fn test_edge_main_exact() {
        assert_eq!(kinds("_main"), vec![TokenKind::Main]);
    }

    #[test]
    fn test_edge_main_prefix_diverges_immediately() {
        assert_eq!(kinds("_xain"), vec![TokenKind::FunId]);
    }

    #[test]
    fn test_edge_integer_value() {
        let (kinds, _, _) = lex_all("4209");
        assert_eq!(kinds, vec![TokenKind::Num]);
    }

    #[test]
    fn test_edge_real_value_and_rounding() {
        let keywords = KeywordTable::new();
        let mut symtab = SymbolTable::new();
        let mut handler = Handler::new();
        let mut lexer = Lexer::new(Cursor::new(b"2.50".to_vec()), &keywords, &mut symtab, &mut handler)
            .unwrap();
        let token = lexer.next_token();
        match symtab.entry(token.entry).value {
            Value::Real(v) => assert!((v - 2.5).abs() < 1e-9),
            _ => panic!("expected a real value"),
        }
    }

    #[test]
    fn test_edge_all_relational_and_logical_operators() {
        let (kinds, _, _) = lex_all("< <= > >= == != &&& @@@ ~");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Lt,
                TokenKind::Le,
                TokenKind::Gt,
                TokenKind::Ge,
                TokenKind::Eq,
                TokenKind::Ne,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Not,
            ]
        );
    }

    #[test]
    fn test_edge_all_punctuation() {
        let (kinds, _, _) = lex_all(", ; : . ( ) [ ]");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Colon,
                TokenKind::Dot,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBracket,
                TokenKind::RBracket,
            ]
        );
    }

    #[test]
    fn test_edge_nested_parens() {
        let (kinds, _, _) = lex_all("((()))");
        assert_eq!(
            kinds.iter().filter(|k| **k == TokenKind::LParen).count(),
            3
        );
    }

    #[test]
    fn test_edge_keyword_prefix_is_not_a_keyword() {
        let (kinds, lexemes, _) = lex_all("whileloop while");
        assert_eq!(kinds[0], TokenKind::FieldId);
        assert_eq!(lexemes[0], "whileloop");
        assert_eq!(kinds[1], TokenKind::While);
    }

    #[test]
    fn test_edge_ruid() {
        let (kinds, lexemes, _) = lex_all("#abc");
        assert_eq!(kinds, vec![TokenKind::RuId]);
        assert_eq!(lexemes[0], "#abc");
    }

    #[test]
    fn test_edge_assignop() {
        assert_eq!(kinds("<---"), vec![TokenKind::AssignOp]);
    }

    #[test]
    fn test_edge_comment_to_end_of_line() {
        let (kinds, lexemes, _) = lex_all("% a comment with <--- inside it\nwhile");
        assert_eq!(kinds, vec![TokenKind::Comment, TokenKind::While]);
        assert_eq!(lexemes[0], "%");
    }

    #[test]
    fn test_edge_comment_at_eof_with_no_trailing_newline() {
        let (kinds, _, _) = lex_all("% trailing comment, no newline");
        assert_eq!(kinds, vec![TokenKind::Comment]);
    }

    #[test]
    fn test_edge_rnum_fraction_capped_at_two_digits() {
        let (kinds, _, _) = lex_all("1.23456");
        assert_eq!(kinds, vec![TokenKind::Rnum, TokenKind::Num]);
    }

    #[test]
    fn test_edge_dot_without_digit_splits_into_num_and_dot() {
        assert_eq!(kinds("7."), vec![TokenKind::Num, TokenKind::Dot]);
    }

    #[test]
    fn test_edge_exponent_with_explicit_plus() {
        let (kinds, lexemes, _) = lex_all("1.50E+02");
        assert_eq!(kinds, vec![TokenKind::Rnum]);
        assert_eq!(lexemes[0], "1.50E02");
    }

    #[test]
    fn test_err_single_fraction_digit_is_invalid() {
        // `original_source/lexer.c` state 61 requires exactly two
        // fractional digits; a lone one is a lexical error, not a
        // truncated-but-valid RNUM.
        let (kinds, _, handler) = lex_all("1.5");
        assert_eq!(kinds, vec![TokenKind::LexicalError]);
        assert!(handler.has_errors());
    }

    #[test]
    fn test_err_single_exponent_digit_is_invalid() {
        // `original_source/lexer.c` states 62/63/64 require exactly two
        // exponent digits; a lone one is a lexical error, matching the
        // already-covered zero-digit case.
        let (kinds, _, handler) = lex_all("1.50E5");
        assert_eq!(kinds, vec![TokenKind::LexicalError]);
        assert!(handler.has_errors());
    }

    #[test]
    fn test_edge_repeated_lexeme_same_line_shares_entry() {
        let keywords = KeywordTable::new();
        let mut symtab = SymbolTable::new();
        let mut handler = Handler::new();
        let mut lexer =
            Lexer::new(Cursor::new(b"bc22 bc22".to_vec()), &keywords, &mut symtab, &mut handler)
                .unwrap();
        let first = lexer.next_token();
        let second = lexer.next_token();
        assert_eq!(first.entry, second.entry);
    }

    // ==================== ERROR CASES ====================

    #[test]
    fn test_err_overlong_id_reports_error() {
        let name = format!("bc{}", "2".repeat(25));
        let (kinds, _, handler) = lex_all(&name);
        assert_eq!(kinds, vec![TokenKind::IdLengthExceeded]);
        assert!(handler.has_errors());
    }

    #[test]
    fn test_err_overlong_funid_reports_error() {
        let name = format!("_{}", "q".repeat(40));
        let (kinds, _, handler) = lex_all(&name);
        assert_eq!(kinds, vec![TokenKind::FunLengthExceeded]);
        assert!(handler.has_errors());
    }

    #[test]
    fn test_err_lone_hash_is_invalid() {
        let (kinds, _, handler) = lex_all("#9");
        assert_eq!(kinds[0], TokenKind::LexicalError);
        assert!(handler.has_errors());
    }

    #[test]
    fn test_err_bare_equals_is_invalid() {
        let (kinds, _, handler) = lex_all("=");
        assert_eq!(kinds, vec![TokenKind::LexicalError]);
        assert!(handler.has_errors());
    }

    #[test]
    fn test_err_bare_ampersand_is_invalid() {
        let (kinds, _, handler) = lex_all("&");
        assert_eq!(kinds, vec![TokenKind::LexicalError]);
        assert!(handler.has_errors());
    }

    #[test]
    fn test_err_partial_ampersand_is_invalid() {
        let (kinds, _, handler) = lex_all("&&");
        assert_eq!(kinds, vec![TokenKind::LexicalError]);
        assert!(handler.has_errors());
    }

    #[test]
    fn test_err_partial_assignop_is_invalid() {
        let (kinds, _, handler) = lex_all("<--");
        assert_eq!(kinds, vec![TokenKind::LexicalError]);
        assert!(handler.has_errors());
    }

    #[test]
    fn test_err_missing_exponent_digits_is_invalid() {
        let (kinds, _, handler) = lex_all("1.50E");
        assert_eq!(kinds, vec![TokenKind::LexicalError]);
        assert!(handler.has_errors());
    }

    #[test]
    fn test_err_unrecognized_character() {
        let (kinds, _, handler) = lex_all("^");
        assert_eq!(kinds, vec![TokenKind::LexicalError]);
        assert!(handler.has_errors());
    }

    #[test]
    fn test_err_mixed_valid_and_invalid_on_one_line() {
        let (kinds, _, handler) = lex_all("while ^ endwhile");
        assert_eq!(
            kinds,
            vec![TokenKind::While, TokenKind::LexicalError, TokenKind::EndWhile]
        );
        assert!(handler.has_errors());
    }

    #[test]
    fn test_err_several_invalid_tokens_all_reported() {
        let (_, _, handler) = lex_all("^ & = !");
        assert_eq!(handler.diagnostics().len(), 4);
    }
}
