use crate::{
    error::GlotError,
    tokenizer::Token,
    types::{FieldDef, FieldType, ScalarType, SchemaFile, TypeDef},
    utils::{error, quote, to_pascal_case},
};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref IDENTIFIER:       Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*$").unwrap();
    static ref EQUALS:           Regex = Regex::new(r"^=$").unwrap();
    static ref SEMICOLON:        Regex = Regex::new(r"^;$").unwrap();
    static ref INTEGER:          Regex = Regex::new(r"^-?\d+$").unwrap();
    static ref LEFT_BRACE:       Regex = Regex::new(r"^\{$").unwrap();
    static ref RIGHT_BRACE:      Regex = Regex::new(r"^\}$").unwrap();
    static ref LEFT_ANGLE:       Regex = Regex::new(r"^<$").unwrap();
    static ref RIGHT_ANGLE:      Regex = Regex::new(r"^>$").unwrap();
    static ref COMMA:            Regex = Regex::new(r"^,$").unwrap();
    static ref MESSAGE_KEYWORD:  Regex = Regex::new(r"^message$").unwrap();
    static ref PACKAGE_KEYWORD:  Regex = Regex::new(r"^package$").unwrap();
    static ref REPEATED_KEYWORD: Regex = Regex::new(r"^repeated$").unwrap();
    static ref MAP_KEYWORD:      Regex = Regex::new(r"^map$").unwrap();
    static ref TRANSLATED_TOKEN: Regex = Regex::new(r"^\[translated\]$").unwrap();
    static ref EOF:              Regex = Regex::new(r"^$").unwrap();
}

fn current_token<'a>(tokens: &'a [Token], index: usize) -> &'a Token {
    tokens.get(index).expect("Unexpected end of tokens")
}

fn eat(tokens: &[Token], index: &mut usize, test: &Regex) -> bool {
    if test.is_match(&current_token(tokens, *index).text) {
        *index += 1;
        true
    } else {
        false
    }
}

fn expect(tokens: &[Token], index: &mut usize, test: &Regex, expected: &str) -> Result<(), GlotError> {
    if !eat(tokens, index, test) {
        let tok = current_token(tokens, *index);
        return Err(error(
            &format!("Expected {} but found {}", expected, quote(&tok.text)),
            tok.line,
            tok.column,
        ));
    }
    Ok(())
}

fn unexpected_token(tokens: &[Token], index: usize) -> GlotError {
    let tok = current_token(tokens, index);
    error(
        &format!("Unexpected token {}", quote(&tok.text)),
        tok.line,
        tok.column,
    )
}

/// Parses one tokenized `.glot` file into a `SchemaFile`. Map fields are
/// desugared here: `map<string, T> name = N;` becomes a synthesized nested
/// `<Name>Entry` wrapper type with `is_map_entry` set, and the field itself
/// becomes a repeated message-typed field referencing the wrapper.
pub fn parse_schema(name: &str, tokens: &[Token]) -> Result<SchemaFile, GlotError> {
    let mut messages     = Vec::new();
    let mut package_text = None;
    let mut index        = 0;

    // Handle package declaration
    if eat(tokens, &mut index, &PACKAGE_KEYWORD) {
        let pkg_tok = current_token(tokens, index);
        let pkg_text = pkg_tok.text.clone();
        expect(tokens, &mut index, &IDENTIFIER, "identifier")?;
        package_text = Some(pkg_text);
        expect(tokens, &mut index, &SEMICOLON, "\";\"")?;
    }

    // Parse message definitions one by one
    while index < tokens.len() && !eat(tokens, &mut index, &EOF) {
        if !MESSAGE_KEYWORD.is_match(&current_token(tokens, index).text) {
            return Err(unexpected_token(tokens, index));
        }
        messages.push(parse_message(tokens, &mut index)?);
    }

    Ok(SchemaFile {
        name: name.to_string(),
        package: package_text,
        messages,
    })
}

fn parse_message(tokens: &[Token], index: &mut usize) -> Result<TypeDef, GlotError> {
    expect(tokens, index, &MESSAGE_KEYWORD, "\"message\"")?;

    let name_tok = current_token(tokens, *index);
    let (name, line, column) = (name_tok.text.clone(), name_tok.line, name_tok.column);
    expect(tokens, index, &IDENTIFIER, "identifier")?;
    expect(tokens, index, &LEFT_BRACE, "\"{\"")?;

    let mut fields = Vec::new();
    let mut nested = Vec::new();

    while !eat(tokens, index, &RIGHT_BRACE) {
        if MESSAGE_KEYWORD.is_match(&current_token(tokens, *index).text) {
            nested.push(parse_message(tokens, index)?);
            continue;
        }

        let repeated = eat(tokens, index, &REPEATED_KEYWORD);
        if MAP_KEYWORD.is_match(&current_token(tokens, *index).text) {
            if repeated {
                let tok = current_token(tokens, *index);
                return Err(error("Map fields cannot be repeated", tok.line, tok.column));
            }
            let (field, entry) = parse_map_field(tokens, index)?;
            fields.push(field);
            nested.push(entry);
            continue;
        }

        // Field type
        let type_tok = current_token(tokens, *index);
        let type_text = type_tok.text.clone();
        expect(tokens, index, &IDENTIFIER, "identifier")?;
        let ty = match ScalarType::parse(&type_text) {
            Some(scalar) => FieldType::Scalar(scalar),
            None => FieldType::Message(type_text),
        };

        let (field_name, tag, translated, field_line, field_column) =
            parse_field_tail(tokens, index)?;

        fields.push(FieldDef {
            name: field_name,
            line: field_line,
            column: field_column,
            ty,
            repeated,
            translated,
            tag,
        });
    }

    Ok(TypeDef {
        name,
        line,
        column,
        fields,
        nested,
        is_map_entry: false,
    })
}

/// Parses `map < string , T > name = N [translated]? ;` and returns the
/// desugared repeated field plus the synthesized map-entry wrapper type.
fn parse_map_field(tokens: &[Token], index: &mut usize) -> Result<(FieldDef, TypeDef), GlotError> {
    expect(tokens, index, &MAP_KEYWORD, "\"map\"")?;
    expect(tokens, index, &LEFT_ANGLE, "\"<\"")?;

    let key_tok = current_token(tokens, *index);
    if key_tok.text != "string" {
        return Err(error(
            &format!("Map keys must be \"string\", found {}", quote(&key_tok.text)),
            key_tok.line,
            key_tok.column,
        ));
    }
    expect(tokens, index, &IDENTIFIER, "identifier")?;
    expect(tokens, index, &COMMA, "\",\"")?;

    let value_tok = current_token(tokens, *index);
    let value_text = value_tok.text.clone();
    expect(tokens, index, &IDENTIFIER, "identifier")?;
    expect(tokens, index, &RIGHT_ANGLE, "\">\"")?;

    let value_ty = match ScalarType::parse(&value_text) {
        Some(scalar) => FieldType::Scalar(scalar),
        None => FieldType::Message(value_text),
    };

    let (field_name, tag, translated, field_line, field_column) = parse_field_tail(tokens, index)?;

    let entry_name = format!("{}Entry", to_pascal_case(&field_name));
    let entry = TypeDef {
        name: entry_name.clone(),
        line: field_line,
        column: field_column,
        fields: vec![
            FieldDef {
                name: "key".to_string(),
                line: field_line,
                column: field_column,
                ty: FieldType::Scalar(ScalarType::String),
                repeated: false,
                translated: false,
                tag: 1,
            },
            FieldDef {
                name: "value".to_string(),
                line: field_line,
                column: field_column,
                ty: value_ty,
                repeated: false,
                translated: false,
                tag: 2,
            },
        ],
        nested: Vec::new(),
        is_map_entry: true,
    };

    let field = FieldDef {
        name: field_name,
        line: field_line,
        column: field_column,
        ty: FieldType::Message(entry_name),
        repeated: true,
        translated,
        tag,
    };

    Ok((field, entry))
}

fn parse_field_tail(
    tokens: &[Token],
    index: &mut usize,
) -> Result<(String, i32, bool, usize, usize), GlotError> {
    let name_tok = current_token(tokens, *index);
    let (name, line, column) = (name_tok.text.clone(), name_tok.line, name_tok.column);
    expect(tokens, index, &IDENTIFIER, "identifier")?;

    expect(tokens, index, &EQUALS, "\"=\"")?;
    let tag_tok = current_token(tokens, *index);
    let (tag_text, tag_line, tag_column) = (tag_tok.text.clone(), tag_tok.line, tag_tok.column);
    expect(tokens, index, &INTEGER, "integer")?;
    let tag = tag_text.parse::<i32>().map_err(|_| {
        error(
            &format!("Invalid integer {}", quote(&tag_text)),
            tag_line,
            tag_column,
        )
    })?;

    let translated = eat(tokens, index, &TRANSLATED_TOKEN);
    expect(tokens, index, &SEMICOLON, "\";\"")?;

    Ok((name, tag, translated, line, column))
}
