use crate::bipartite::Coloring;
use crate::error::{GraphError, GraphResult};
use crate::graph::*;

use std::ffi::OsStr;
use std::io;
use std::io::{BufRead,BufReader,BufWriter,Write};
use std::fs::File;
use std::path::Path;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use itertools::Itertools;
use log::debug;

/// Whether the rows of an input describe edges or a full adjacency matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Every row holds two vertex ids `u v`.
    Edges,
    /// Row `i` holds the 0/1 entries of matrix row `i`.
    Matrix,
}

/// How the fields of a row are separated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Whitespace,
    Char(char),
}

/// Describes the text format a graph is read from and the capacity of the resulting graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    pub layout: Layout,
    pub delimiter: Delimiter,
    /// The first line holds the number of rows that follow.
    pub counted: bool,
    pub bound: usize,
}

/// Separator used by the CSV presets.
pub const CSV_SEPARATOR: char = ';';

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions::stdin_edges()
    }
}

impl ReadOptions {
    /// `u;v` rows without a count line.
    pub fn csv_edges() -> Self {
        ReadOptions {
            layout: Layout::Edges,
            delimiter: Delimiter::Char(CSV_SEPARATOR),
            counted: false,
            bound: DEFAULT_BOUND,
        }
    }

    /// `0;1;0` matrix rows without a count line.
    pub fn csv_matrix() -> Self {
        ReadOptions { layout: Layout::Matrix, ..ReadOptions::csv_edges() }
    }

    /// A count line followed by that many `u v` rows.
    pub fn stdin_edges() -> Self {
        ReadOptions {
            layout: Layout::Edges,
            delimiter: Delimiter::Whitespace,
            counted: true,
            bound: DEFAULT_BOUND,
        }
    }

    /// A count line followed by that many `0 1 0` matrix rows.
    pub fn stdin_matrix() -> Self {
        ReadOptions { layout: Layout::Matrix, ..ReadOptions::stdin_edges() }
    }

    pub fn with_bound(self, bound: usize) -> Self {
        ReadOptions { bound, ..self }
    }

    fn fields<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self.delimiter {
            Delimiter::Whitespace => line.split_whitespace().collect(),
            Delimiter::Char(c) => {
                // A single trailing separator is tolerated, empty cells elsewhere are kept.
                let line = line.trim();
                let line = line.strip_suffix(c).unwrap_or(line);
                line.split(c).map(str::trim).collect()
            }
        }
    }
}

pub trait WriteToFile {
    fn write_txt(&self, filename:&str) -> io::Result<()> {
        let file = File::create(filename)?;
        let buf = BufWriter::new(file);
        self.write_buf(Box::new(buf))
    }

    fn write_gzipped(&self, filename:&str) -> io::Result<()> {
        let file = File::create(filename)?;
        let gz = GzEncoder::new(file, Compression::default());
        let buf = BufWriter::new(gz);
        self.write_buf(Box::new(buf))
    }

    fn write_buf(&self, buf:Box<dyn Write>) -> io::Result<()>;
}

pub trait LoadFromFile {
    fn from_txt(filename:&str, opts:&ReadOptions) -> GraphResult<Self> where Self: Sized {
        let buf = open_reader_txt(filename)?;
        Self::from_buf(buf, opts)
    }

    fn from_gzipped(filename:&str, opts:&ReadOptions) -> GraphResult<Self> where Self: Sized {
        let buf = open_reader_gzip(filename)?;
        Self::from_buf(buf, opts)
    }

    /// Picks plain text or gzip based on the file extension.
    fn from_file(filename:&str, opts:&ReadOptions) -> GraphResult<Self> where Self: Sized {
        let buf = open_reader(filename)?;
        Self::from_buf(buf, opts)
    }

    fn from_buf(buf:Box<dyn BufRead>, opts:&ReadOptions) -> GraphResult<Self> where Self: Sized;
}

/// I/O operations for [MatrixGraph] defined in [crate::io]
impl LoadFromFile for MatrixGraph {
    /// Loads a graph from text, either as a list of edges or as a full adjacency matrix.
    ///
    /// For example, with [ReadOptions::stdin_edges] the input
    /// ```text
    /// 3
    /// 0 1
    /// 0 2
    /// 0 3
    /// ```
    /// describes a star with three leaves, and with [ReadOptions::csv_matrix] the input
    /// ```text
    /// 0;1;1
    /// 1;0;0
    /// 1;0;0
    /// ```
    /// describes a path on three vertices.
    ///
    /// ```rust,no_run
    /// use adjcheck::graph::*;
    /// use adjcheck::io::*;
    ///
    /// let graph = MatrixGraph::from_file("edges.csv", &ReadOptions::csv_edges()).expect("Could not open edges.csv");
    /// println!("Edges: {:?}", graph.edges());
    /// ```
    fn from_buf(buf:Box<dyn BufRead>, opts:&ReadOptions) -> GraphResult<Self> where Self: Sized {
        read_graph(buf, opts)
    }
}

impl WriteToFile for MatrixGraph {
    /// Writes the adjacency matrix over the active range, one row per line.
    fn write_buf(&self, mut buf:Box<dyn Write>) -> io::Result<()> {
        write_matrix(self, &mut buf)?;
        buf.flush()
    }
}

impl WriteToFile for Coloring {
    fn write_buf(&self, mut buf:Box<dyn Write>) -> io::Result<()> {
        write_coloring(self, &mut buf)?;
        buf.flush()
    }
}

/// Reads a graph from `reader` in the format described by `opts`.
pub fn read_graph<R: BufRead>(reader: R, opts: &ReadOptions) -> GraphResult<MatrixGraph> {
    let lines: Vec<String> = reader.lines().collect::<io::Result<_>>()?;

    let mut expected: Option<usize> = None;
    let mut rows: Vec<(usize, Vec<&str>)> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let lineno = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        if opts.counted && expected.is_none() {
            expected = Some(parse_count(line.trim(), lineno)?);
            continue;
        }
        rows.push((lineno, opts.fields(line)));
    }

    if let Some(count) = expected {
        if count != rows.len() {
            return Err(GraphError::InconsistentMatrix(
                format!("announced {} rows but found {}", count, rows.len())))
        }
    }

    let graph = match opts.layout {
        Layout::Edges => edges_from_rows(&rows, opts.bound)?,
        Layout::Matrix => matrix_from_rows(&rows, opts.bound)?,
    };

    debug!("Loaded graph with {} vertices and {} edges from {} rows",
        graph.num_vertices(), graph.num_edges(), rows.len());
    Ok(graph)
}

fn edges_from_rows(rows: &[(usize, Vec<&str>)], bound: usize) -> GraphResult<MatrixGraph> {
    let mut G = MatrixGraph::try_new(bound)?;
    for (lineno, fields) in rows {
        if fields.len() < 2 {
            return Err(GraphError::MalformedInput {
                line: *lineno,
                reason: format!("expected two vertex ids but found {} field(s)", fields.len()),
            })
        }
        if fields.len() > 2 {
            debug!("Ignoring {} extra field(s) at line {}", fields.len() - 2, lineno);
        }
        let u = parse_vertex(fields[0], *lineno)?;
        let v = parse_vertex(fields[1], *lineno)?;

        G.add_edge(u, v)?;
    }

    Ok(G)
}

fn matrix_from_rows(rows: &[(usize, Vec<&str>)], bound: usize) -> GraphResult<MatrixGraph> {
    let mut matrix: Vec<Vec<u8>> = Vec::with_capacity(rows.len());
    for (lineno, fields) in rows {
        if fields.len() != rows.len() {
            return Err(GraphError::InconsistentMatrix(
                format!("line {} has {} entries but the matrix has {} rows", lineno, fields.len(), rows.len())))
        }
        let row = fields.iter()
            .map(|s| parse_entry(s, *lineno))
            .collect::<GraphResult<Vec<u8>>>()?;
        matrix.push(row);
    }

    MatrixGraph::from_matrix_with_bound(&matrix, bound)
}

/// Writes the adjacency matrix over the active range as space separated 0/1 rows.
pub fn write_matrix<W: Write + ?Sized>(graph: &MatrixGraph, w: &mut W) -> io::Result<()> {
    for u in graph.vertex_range() {
        let row = graph.row(u).map(|b| if b { "1" } else { "0" }).join(" ");
        writeln!(w, "{}", row)?;
    }
    Ok(())
}

/// Writes the edge log, one `u v` pair per line.
pub fn write_edges<W: Write + ?Sized>(graph: &MatrixGraph, w: &mut W) -> io::Result<()> {
    for (u, v) in graph.edges() {
        writeln!(w, "{u} {v}")?;
    }
    Ok(())
}

/// Writes one `vertex: colour` line per vertex; unreached vertices are reported as `none`.
pub fn write_coloring<W: Write + ?Sized>(coloring: &Coloring, w: &mut W) -> io::Result<()> {
    for (v, side) in coloring.sides().iter().enumerate() {
        match side {
            Some(side) => writeln!(w, "{v}: {side}")?,
            None => writeln!(w, "{v}: none")?,
        }
    }
    Ok(())
}

fn open_reader(filename:&str) -> io::Result<Box<dyn BufRead>> {
    let path = Path::new(&filename);
    match path.extension().and_then(OsStr::to_str) {
        Some("gz") => open_reader_gzip(filename),
        _ => open_reader_txt(filename),
    }
}

fn open_reader_txt(filename:&str) -> io::Result<Box<dyn BufRead>> {
    let path = Path::new(&filename);
    let file = File::open(path)?;
    Ok(Box::new(BufReader::new(file)))
}

fn open_reader_gzip(filename:&str) -> io::Result<Box<dyn BufRead>> {
    let path = Path::new(&filename);
    let file = File::open(path)?;
    let gz = GzDecoder::new(file);
    Ok(Box::new(BufReader::new(gz)))
}

fn parse_count(s: &str, lineno:usize) -> GraphResult<usize> {
    s.parse::<usize>().map_err(|_| GraphError::MalformedInput {
        line: lineno,
        reason: format!("cannot parse row count `{}`", s),
    })
}

fn parse_vertex(s: &str, lineno:usize) -> GraphResult<Vertex> {
    s.parse::<Vertex>().map_err(|_| GraphError::MalformedInput {
        line: lineno,
        reason: format!("cannot parse vertex id `{}`", s),
    })
}

fn parse_entry(s: &str, lineno:usize) -> GraphResult<u8> {
    match s.parse::<u8>() {
        Ok(x) if x <= 1 => Ok(x),
        _ => Err(GraphError::MalformedInput {
            line: lineno,
            reason: format!("matrix entry `{}` is neither 0 nor 1", s),
        }),
    }
}


//  #######
//     #    ######  ####  #####  ####
//     #    #      #        #   #
//     #    #####   ####    #    ####
//     #    #           #   #        #
//     #    #      #    #   #   #    #
//     #    ######  ####    #    ####
