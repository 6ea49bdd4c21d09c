use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::anychar,
    combinator::{eof, opt, peek, value},
    sequence::terminated,
    IResult,
};

use super::{KeyCode, Modifiers, SpecialKey, Wildcard};

fn parse_flag<'a>(
    prefix: &'static str,
    flag: Modifiers,
) -> impl FnMut(&'a str) -> IResult<&'a str, Modifiers> {
    move |input| {
        let (input, m) = opt(tag(prefix))(input)?;

        Ok((input, m.map(|_| flag).unwrap_or(Modifiers::empty())))
    }
}

/// Strip the compact modifier prefixes, in the fixed order `C-`, `A-`, `S-`.
pub(super) fn parse_compact_mods(input: &str) -> IResult<&str, Modifiers> {
    let (input, ctrl) = parse_flag("C-", Modifiers::CTRL)(input)?;
    let (input, alt) = parse_flag("A-", Modifiers::ALT)(input)?;
    let (input, shift) = parse_flag("S-", Modifiers::SHIFT)(input)?;

    Ok((input, ctrl | alt | shift))
}

fn parse_raw_flag<'a>(
    prefix: &'static str,
    flag: Modifiers,
) -> impl FnMut(&'a str) -> IResult<&'a str, Modifiers> {
    move |input| {
        // Only strip the prefix when a key name follows it.
        let (input, m) = opt(terminated(tag(prefix), peek(anychar)))(input)?;

        Ok((input, m.map(|_| flag).unwrap_or(Modifiers::empty())))
    }
}

/// Strip terminal event modifier prefixes, in the fixed order `CTRL_`, `ALT_`, `SHIFT_`.
pub(super) fn parse_raw_mods(input: &str) -> IResult<&str, Modifiers> {
    let (input, ctrl) = parse_raw_flag("CTRL_", Modifiers::CTRL)(input)?;
    let (input, alt) = parse_raw_flag("ALT_", Modifiers::ALT)(input)?;
    let (input, shift) = parse_raw_flag("SHIFT_", Modifiers::SHIFT)(input)?;

    Ok((input, ctrl | alt | shift))
}

fn parse_compact_special(input: &str) -> IResult<&str, KeyCode> {
    let (input, code) = alt((
        value(KeyCode::Special(SpecialKey::Escape), tag("ESC")),
        value(KeyCode::Special(SpecialKey::Enter), tag("RET")),
        value(KeyCode::Special(SpecialKey::Backspace), tag("BAK")),
        value(KeyCode::Special(SpecialKey::Tab), tag("TAB")),
        value(KeyCode::Special(SpecialKey::Delete), tag("DEL")),
        value(KeyCode::Wildcard(Wildcard::Any), tag("$any")),
        value(KeyCode::Wildcard(Wildcard::Alpha), tag("$alpha")),
    ))(input)?;
    let (input, _) = eof(input)?;

    Ok((input, code))
}

fn parse_raw_special(input: &str) -> IResult<&str, KeyCode> {
    let (input, code) = alt((
        value(KeyCode::Special(SpecialKey::Escape), tag("ESCAPE")),
        value(KeyCode::Special(SpecialKey::Enter), tag("ENTER")),
        value(KeyCode::Special(SpecialKey::Backspace), tag("BACKSPACE")),
        value(KeyCode::Special(SpecialKey::Tab), tag("TAB")),
        value(KeyCode::Special(SpecialKey::Delete), tag("DELETE")),
    ))(input)?;
    let (input, _) = eof(input)?;

    Ok((input, code))
}

fn single_char(input: &str) -> Option<char> {
    let mut chars = input.chars();
    let c = chars.next()?;

    chars.next().is_none().then_some(c)
}

fn literal(token: &str) -> KeyCode {
    if let Some(c) = single_char(token) {
        return KeyCode::Char(c);
    }

    return KeyCode::Name(token.to_string());
}

/// Classify what remains of a compact key once its modifiers have been removed.
pub(super) fn parse_compact_token(input: &str) -> Option<KeyCode> {
    if input.is_empty() {
        return None;
    }

    if let Ok((_, code)) = parse_compact_special(input) {
        return Some(code);
    }

    return Some(literal(input));
}

/// Classify what remains of a terminal event name once its modifiers have been removed.
pub(super) fn parse_raw_token(input: &str, mods: Modifiers) -> KeyCode {
    if let Ok((_, code)) = parse_raw_special(input) {
        return code;
    }

    match single_char(input) {
        // Some characters lowercase to several, and those can only be kept as a name.
        Some(c) if !mods.is_empty() => literal(&c.to_lowercase().collect::<String>()),
        _ => literal(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_mods() {
        assert_eq!(parse_compact_mods("x"), Ok(("x", Modifiers::empty())));
        assert_eq!(parse_compact_mods("C-x"), Ok(("x", Modifiers::CTRL)));
        assert_eq!(parse_compact_mods("C-A-x"), Ok(("x", Modifiers::CTRL | Modifiers::ALT)));
        assert_eq!(parse_compact_mods("C-A-S-x"), Ok(("x", Modifiers::all())));
        assert_eq!(parse_compact_mods("C-"), Ok(("", Modifiers::CTRL)));
    }

    #[test]
    fn test_compact_mods_fixed_order() {
        // Out-of-order prefixes are left as part of the token.
        assert_eq!(parse_compact_mods("S-C-x"), Ok(("C-x", Modifiers::SHIFT)));
        assert_eq!(parse_compact_mods("A-C-x"), Ok(("C-x", Modifiers::ALT)));
    }

    #[test]
    fn test_raw_mods() {
        assert_eq!(parse_raw_mods("CTRL_Q"), Ok(("Q", Modifiers::CTRL)));
        assert_eq!(parse_raw_mods("CTRL_ALT_SHIFT_UP"), Ok(("UP", Modifiers::all())));
        assert_eq!(parse_raw_mods("ALT_"), Ok(("ALT_", Modifiers::empty())));
        assert_eq!(parse_raw_mods("ESCAPE"), Ok(("ESCAPE", Modifiers::empty())));
    }

    #[test]
    fn test_compact_token() {
        assert_eq!(parse_compact_token(""), None);
        assert_eq!(parse_compact_token("x"), Some(KeyCode::Char('x')));
        assert_eq!(parse_compact_token("-"), Some(KeyCode::Char('-')));
        assert_eq!(parse_compact_token("ESC"), Some(KeyCode::Special(SpecialKey::Escape)));
        assert_eq!(parse_compact_token("DEL"), Some(KeyCode::Special(SpecialKey::Delete)));
        assert_eq!(parse_compact_token("$any"), Some(KeyCode::Wildcard(Wildcard::Any)));
        assert_eq!(parse_compact_token("$alpha"), Some(KeyCode::Wildcard(Wildcard::Alpha)));
        assert_eq!(parse_compact_token("ESCAPE"), Some(KeyCode::Name("ESCAPE".into())));
        assert_eq!(parse_compact_token("F1"), Some(KeyCode::Name("F1".into())));
    }

    #[test]
    fn test_raw_token() {
        let none = Modifiers::empty();

        assert_eq!(parse_raw_token("ENTER", none), KeyCode::Special(SpecialKey::Enter));
        assert_eq!(parse_raw_token("BACKSPACE", none), KeyCode::Special(SpecialKey::Backspace));
        assert_eq!(parse_raw_token("UP", none), KeyCode::Name("UP".into()));
        assert_eq!(parse_raw_token("UP", Modifiers::CTRL), KeyCode::Name("UP".into()));
        assert_eq!(parse_raw_token("A", none), KeyCode::Char('A'));
        assert_eq!(parse_raw_token("Q", Modifiers::CTRL), KeyCode::Char('q'));
        assert_eq!(parse_raw_token("É", Modifiers::ALT), KeyCode::Char('é'));
        assert_eq!(parse_raw_token("Ж", Modifiers::CTRL), KeyCode::Char('ж'));
        assert_eq!(parse_raw_token("İ", Modifiers::ALT), KeyCode::Name("i\u{307}".into()));
        assert_eq!(parse_raw_token("TAB", Modifiers::SHIFT), KeyCode::Special(SpecialKey::Tab));
    }
}
