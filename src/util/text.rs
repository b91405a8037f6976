//! Provider text sanitising
//!
//! The trivia provider embeds HTML character references (and occasionally
//! tags) in question and answer strings. Everything shown in the terminal
//! goes through [`sanitize`] so that a single policy applies to all of it.

/// Named character references the provider is known to emit, plus the usual
/// Latin-1 set.
const NAMED_ENTITIES: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", ' '),
    ("shy", '\u{00AD}'),
    ("ldquo", '\u{201C}'),
    ("rdquo", '\u{201D}'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("hellip", '\u{2026}'),
    ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'),
    ("deg", '\u{00B0}'),
    ("pi", '\u{03C0}'),
    ("Pi", '\u{03A0}'),
    ("times", '\u{00D7}'),
    ("divide", '\u{00F7}'),
    ("laquo", '\u{00AB}'),
    ("raquo", '\u{00BB}'),
    ("copy", '\u{00A9}'),
    ("reg", '\u{00AE}'),
    ("trade", '\u{2122}'),
    ("sup2", '\u{00B2}'),
    ("sup3", '\u{00B3}'),
    ("frac12", '\u{00BD}'),
    ("iexcl", '\u{00A1}'),
    ("iquest", '\u{00BF}'),
    ("szlig", '\u{00DF}'),
    ("aacute", 'á'),
    ("Aacute", 'Á'),
    ("agrave", 'à'),
    ("Agrave", 'À'),
    ("acirc", 'â'),
    ("atilde", 'ã'),
    ("auml", 'ä'),
    ("Auml", 'Ä'),
    ("aring", 'å'),
    ("Aring", 'Å'),
    ("aelig", 'æ'),
    ("ccedil", 'ç'),
    ("Ccedil", 'Ç'),
    ("eacute", 'é'),
    ("Eacute", 'É'),
    ("egrave", 'è'),
    ("ecirc", 'ê'),
    ("euml", 'ë'),
    ("iacute", 'í'),
    ("igrave", 'ì'),
    ("icirc", 'î'),
    ("iuml", 'ï'),
    ("ntilde", 'ñ'),
    ("Ntilde", 'Ñ'),
    ("oacute", 'ó'),
    ("Oacute", 'Ó'),
    ("ograve", 'ò'),
    ("ocirc", 'ô'),
    ("otilde", 'õ'),
    ("ouml", 'ö'),
    ("Ouml", 'Ö'),
    ("oslash", 'ø'),
    ("Oslash", 'Ø'),
    ("uacute", 'ú'),
    ("ugrave", 'ù'),
    ("ucirc", 'û'),
    ("uuml", 'ü'),
    ("Uuml", 'Ü'),
    ("yacute", 'ý'),
    ("scaron", 'š'),
    ("Scaron", 'Š'),
    ("zcaron", 'ž'),
];

/// Longest reference name we look for before giving up on a `&`
const MAX_ENTITY_LEN: usize = 10;

/// Decode HTML character references. Unknown references are kept verbatim.
///
/// # Examples
/// ```
/// use trivium::util::text::decode_entities;
///
/// assert_eq!(decode_entities("Tom &amp; Jerry"), "Tom & Jerry");
/// assert_eq!(decode_entities("&quot;Hi&quot; &#039;there&#x27;"), "\"Hi\" 'there'");
/// assert_eq!(decode_entities("5 &unknown; 6"), "5 &unknown; 6");
/// ```
pub fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        let decoded = after
            .find(';')
            .filter(|&end| end > 0 && end <= MAX_ENTITY_LEN)
            .and_then(|end| decode_reference(&after[..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &after[end + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    NAMED_ENTITIES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, c)| *c)
}

/// Remove anything that looks like an HTML tag (`<...>`).
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut tag_start: Option<usize> = None;
    for (i, c) in input.char_indices() {
        match (c, tag_start) {
            ('<', None) => tag_start = Some(i),
            ('>', Some(_)) => tag_start = None,
            (_, None) => out.push(c),
            _ => {}
        }
    }
    // An unterminated '<' was not a tag after all.
    if let Some(start) = tag_start {
        out.push_str(&input[start..]);
    }
    out
}

/// Turn provider text into plain terminal text.
///
/// Tags are stripped before references are decoded, so an encoded `&lt;b&gt;`
/// survives as the literal text `<b>`. Control characters are dropped and
/// whitespace runs collapse to one space.
///
/// ```
/// use trivium::util::text::sanitize;
///
/// assert_eq!(
///     sanitize("Which <i>film</i> said &quot;I&#039;ll be back&quot;?"),
///     "Which film said \"I'll be back\"?"
/// );
/// ```
pub fn sanitize(input: &str) -> String {
    let decoded = decode_entities(&strip_tags(input));
    let mut out = String::with_capacity(decoded.len());
    let mut pending_space = false;
    for c in decoded.chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
        } else if c.is_control() || c == '\u{00AD}' {
            continue;
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }
    out
}
