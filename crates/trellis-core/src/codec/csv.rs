//! CSV form: a fixed header followed by one row per vertex and one row per edge.
//!
//! ```text
//! type,id,x,y,source,target,weight,directed
//! vertex,V1,0,0,,,,
//! vertex,V2,10,5,,,,
//! edge,,,,V1,V2,2.5,true
//! ```
//!
//! Edges with `directed=true` decode as directed weighted edges, the rest as weighted edges.
//! Vertex rows are applied before edge rows regardless of their order in the file. Fields
//! containing a comma, a quote or a line break are quoted, and a quoted field may span lines.

use trellis_graph::{Edge, Graph};

use crate::error::{Error, Result};

pub const HEADER: &str = "type,id,x,y,source,target,weight,directed";

pub fn encode(graph: &Graph) -> String {
    let mut out = String::with_capacity(64 * (graph.vertex_count() + graph.edge_count() + 1));
    out.push_str(HEADER);
    out.push('\n');
    for (v, p) in graph.positions() {
        out.push_str(&format!("vertex,{},{},{},,,,\n", quote(v.id()), p.x, p.y));
    }
    for e in graph.edges() {
        out.push_str(&format!(
            "edge,,,,{},{},{},{}\n",
            quote(e.from().id()),
            quote(e.to().id()),
            e.weight(),
            e.is_directed()
        ));
    }
    out
}

pub fn decode(text: &str) -> Result<Graph> {
    let mut rows = Vec::new();
    let mut header_seen = false;
    for (line_no, fields) in records(text)? {
        if matches!(fields.as_slice(), [only] if only.trim().is_empty()) {
            continue;
        }
        if !header_seen {
            if !fields.iter().map(|f| f.trim()).eq(HEADER.split(',')) {
                return Err(csv_error(line_no, format!("expected header `{HEADER}`")));
            }
            header_seen = true;
            continue;
        }
        rows.push((line_no, fields));
    }

    let mut graph = Graph::new();
    for (line_no, fields) in &rows {
        match fields.first().map(String::as_str) {
            Some("vertex") => {
                let [_, id, x, y, ..] = fields.as_slice() else {
                    return Err(csv_error(*line_no, "vertex row needs id, x and y".into()));
                };
                let x = parse_f64(x, "x", *line_no)?;
                let y = parse_f64(y, "y", *line_no)?;
                graph.add_vertex(id.as_str())?;
                graph.set_position(id, x, y)?;
            }
            Some("edge") | None => {}
            Some(other) => {
                return Err(csv_error(*line_no, format!("unknown row type `{other}`")));
            }
        }
    }

    for (line_no, fields) in &rows {
        if fields.first().map(String::as_str) != Some("edge") {
            continue;
        }
        let [_, _, _, _, source, target, weight, directed, ..] = fields.as_slice() else {
            return Err(csv_error(
                *line_no,
                "edge row needs source, target, weight and directed".into(),
            ));
        };
        for id in [source, target] {
            if !graph.contains_vertex(id) {
                return Err(Error::UnknownVertexReference { id: id.clone() });
            }
        }
        let weight = parse_f64(weight, "weight", *line_no)?;
        let edge = match directed.trim().to_ascii_lowercase().as_str() {
            "true" => Edge::directed_weighted(source.as_str(), target.as_str(), weight)?,
            "false" => Edge::weighted(source.as_str(), target.as_str(), weight),
            other => {
                return Err(csv_error(
                    *line_no,
                    format!("directed must be true or false, got `{other}`"),
                ));
            }
        };
        graph.add_edge(edge)?;
    }

    Ok(graph)
}

fn csv_error(line: usize, message: String) -> Error {
    Error::Csv { line, message }
}

fn parse_f64(field: &str, name: &str, line: usize) -> Result<f64> {
    match field.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(csv_error(
            line,
            format!("{name} is not a finite number: `{field}`"),
        )),
    }
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Splits `text` into records, each tagged with the line it starts on. Line breaks inside
/// quoted fields belong to the field.
fn records(text: &str) -> Result<Vec<(usize, Vec<String>)>> {
    let mut out = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut start = 1;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match (in_quotes, c) {
            (true, '"') => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            (true, c) => {
                if c == '\n' {
                    line += 1;
                }
                field.push(c);
            }
            (false, '"') if field.is_empty() => in_quotes = true,
            (false, ',') => fields.push(std::mem::take(&mut field)),
            (false, '\r') if chars.peek() == Some(&'\n') => {}
            (false, '\n') => {
                fields.push(std::mem::take(&mut field));
                out.push((start, std::mem::take(&mut fields)));
                line += 1;
                start = line;
            }
            (false, c) => field.push(c),
        }
    }
    if in_quotes {
        return Err(csv_error(start, "unterminated quoted field".into()));
    }
    if !fields.is_empty() || !field.is_empty() {
        fields.push(field);
        out.push((start, fields));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_vertices_then_edges() {
        let mut g = Graph::new();
        g.add_vertex("V1").unwrap();
        g.add_vertex("V2").unwrap();
        g.set_position("V2", 10.0, 5.5).unwrap();
        g.add_edge(Edge::directed_weighted("V1", "V2", 2.5).unwrap()).unwrap();
        g.add_edge(Edge::weighted("V2", "V1", 1.0)).unwrap();

        assert_eq!(
            encode(&g),
            "type,id,x,y,source,target,weight,directed\n\
             vertex,V1,0,0,,,,\n\
             vertex,V2,10,5.5,,,,\n\
             edge,,,,V1,V2,2.5,true\n\
             edge,,,,V2,V1,1,false\n"
        );
    }

    #[test]
    fn quoted_ids_survive() {
        let mut g = Graph::new();
        g.add_vertex("a,b").unwrap();
        g.add_vertex("say \"hi\"").unwrap();
        g.add_edge(Edge::weighted("a,b", "say \"hi\"", 3.0)).unwrap();

        let back = decode(&encode(&g)).unwrap();
        assert!(back.contains_vertex("a,b"));
        assert!(back.contains_vertex("say \"hi\""));
        assert_eq!(back.edge_weight("a,b", "say \"hi\""), Some(3.0));
    }

    #[test]
    fn ids_with_line_breaks_survive() {
        let mut g = Graph::new();
        g.add_vertex("a\nb").unwrap();
        g.add_vertex("c\r\nd").unwrap();
        g.set_position("c\r\nd", 4.0, 2.0).unwrap();
        g.add_edge(Edge::directed_weighted("a\nb", "c\r\nd", 1.5).unwrap())
            .unwrap();

        let back = decode(&encode(&g)).unwrap();
        assert_eq!(back.vertex_count(), 2);
        assert!(back.contains_vertex("a\nb"));
        assert_eq!(back.position("c\r\nd").map(|p| (p.x, p.y)), Some((4.0, 2.0)));
        assert_eq!(back.edge_weight("a\nb", "c\r\nd"), Some(1.5));
    }

    #[test]
    fn line_numbers_count_breaks_inside_quotes() {
        let text = "type,id,x,y,source,target,weight,directed\n\
                    vertex,\"a\nb\",1,2,,,,\n\
                    vertex,c,oops,4,,,,\n";
        assert!(matches!(decode(text), Err(Error::Csv { line: 4, .. })));
    }

    #[test]
    fn unterminated_quote_is_rejected() {
        let text = "type,id,x,y,source,target,weight,directed\n\
                    vertex,\"a,1,2,,,,\n";
        assert!(matches!(decode(text), Err(Error::Csv { line: 2, .. })));
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let text = "type,id,x,y,source,target,weight,directed\n\
                    vertex,a,1,2,,,,\n\
                    edge,,,,a,a,inf,false\n";
        assert!(matches!(decode(text), Err(Error::Csv { line: 3, .. })));
    }

    #[test]
    fn edge_rows_may_precede_vertex_rows() {
        let text = "type,id,x,y,source,target,weight,directed\n\
                    edge,,,,a,b,4,true\n\
                    vertex,a,1,2,,,,\n\
                    vertex,b,3,4,,,,\n";
        let g = decode(text).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert!(g.edges()[0].is_directed());
        assert_eq!(g.position("b").map(|p| (p.x, p.y)), Some((3.0, 4.0)));
    }

    #[test]
    fn reports_the_offending_line() {
        let text = "type,id,x,y,source,target,weight,directed\n\
                    vertex,a,1,2,,,,\n\
                    vertex,b,oops,4,,,,\n";
        assert!(matches!(decode(text), Err(Error::Csv { line: 3, .. })));
    }

    #[test]
    fn missing_header_is_rejected() {
        assert!(matches!(
            decode("vertex,a,1,2,,,,\n"),
            Err(Error::Csv { line: 1, .. })
        ));
    }

    #[test]
    fn unknown_vertex_reference_is_rejected() {
        let text = "type,id,x,y,source,target,weight,directed\n\
                    vertex,a,1,2,,,,\n\
                    edge,,,,a,ghost,1,false\n";
        assert!(matches!(
            decode(text),
            Err(Error::UnknownVertexReference { id }) if id == "ghost"
        ));
    }

    #[test]
    fn empty_input_is_an_empty_graph() {
        assert!(decode("").unwrap().is_empty());
    }
}
