//! Byte-exact builder for classic files used by the integration tests

#![allow(dead_code)]

use cdfread::NcType;
use cdfread::types::{NC_ATTRIBUTE, NC_DIMENSION, NC_VARIABLE, padded};

pub fn shorts(values: &[i16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

pub fn ints(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

pub fn floats(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

pub fn doubles(values: &[f64]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

struct Att {
    name: String,
    nc_type: NcType,
    count: u32,
    payload: Vec<u8>,
}

struct Var {
    name: String,
    dim_ids: Vec<u32>,
    atts: Vec<Att>,
    nc_type: NcType,
    /// Whole data for fixed variables, one entry per record otherwise
    chunks: Vec<Vec<u8>>,
    is_record: bool,
}

/// Lays out a file: header, fixed variables in order, then the record block
pub struct FileBuilder {
    version: u8,
    streaming: bool,
    dims: Vec<(String, u32)>,
    gatts: Vec<Att>,
    vars: Vec<Var>,
}

impl FileBuilder {
    pub fn new(version: u8) -> Self {
        Self {
            version,
            streaming: false,
            dims: Vec::new(),
            gatts: Vec::new(),
            vars: Vec::new(),
        }
    }

    pub fn streaming(mut self) -> Self {
        self.streaming = true;
        self
    }

    /// Length 0 declares the record dimension
    pub fn dim(mut self, name: &str, length: u32) -> Self {
        self.dims.push((name.into(), length));
        self
    }

    pub fn text_att(mut self, name: &str, text: &str) -> Self {
        self.gatts.push(Att {
            name: name.into(),
            nc_type: NcType::Char,
            count: text.len() as u32,
            payload: text.as_bytes().to_vec(),
        });
        self
    }

    pub fn att(mut self, name: &str, nc_type: NcType, payload: Vec<u8>) -> Self {
        let count = (payload.len() / nc_type.element_size()) as u32;
        self.gatts.push(Att {
            name: name.into(),
            nc_type,
            count,
            payload,
        });
        self
    }

    pub fn fixed(mut self, name: &str, dim_ids: &[u32], nc_type: NcType, data: Vec<u8>) -> Self {
        self.vars.push(Var {
            name: name.into(),
            dim_ids: dim_ids.to_vec(),
            atts: Vec::new(),
            nc_type,
            chunks: vec![data],
            is_record: false,
        });
        self
    }

    pub fn record(
        mut self,
        name: &str,
        dim_ids: &[u32],
        nc_type: NcType,
        records: Vec<Vec<u8>>,
    ) -> Self {
        self.vars.push(Var {
            name: name.into(),
            dim_ids: dim_ids.to_vec(),
            atts: Vec::new(),
            nc_type,
            chunks: records,
            is_record: true,
        });
        self
    }

    /// Attach a text attribute to the last added variable
    pub fn var_text_att(mut self, name: &str, text: &str) -> Self {
        if let Some(var) = self.vars.last_mut() {
            var.atts.push(Att {
                name: name.into(),
                nc_type: NcType::Char,
                count: text.len() as u32,
                payload: text.as_bytes().to_vec(),
            });
        }
        self
    }

    fn num_records(&self) -> usize {
        self.vars
            .iter()
            .filter(|v| v.is_record)
            .map(|v| v.chunks.len())
            .max()
            .unwrap_or(0)
    }

    fn single_record_var(&self) -> bool {
        self.vars.iter().filter(|v| v.is_record).count() == 1
    }

    /// Data bytes per record, from the declared dimensions when there are no records
    fn slot_size(&self, var: &Var) -> usize {
        match var.chunks.first() {
            Some(chunk) => chunk.len(),
            None => {
                let elements: usize = var
                    .dim_ids
                    .iter()
                    .filter_map(|&id| self.dims.get(id as usize))
                    .map(|(_, length)| *length as usize)
                    .filter(|&length| length > 0)
                    .product();
                elements * var.nc_type.element_size()
            }
        }
    }

    fn record_stride(&self, var: &Var) -> usize {
        let size = self.slot_size(var);
        if self.single_record_var() {
            size
        } else {
            padded(size)
        }
    }

    fn vsize(&self, var: &Var) -> u32 {
        padded(self.slot_size(var)) as u32
    }

    /// Byte offset of each variable's data
    pub fn begins(&self) -> Vec<u64> {
        let mut offset = self.header(&vec![0u64; self.vars.len()]).len();
        let mut begins = vec![0u64; self.vars.len()];
        for (i, var) in self.vars.iter().enumerate().filter(|(_, v)| !v.is_record) {
            begins[i] = offset as u64;
            offset += padded(var.chunks[0].len());
        }
        for (i, var) in self.vars.iter().enumerate().filter(|(_, v)| v.is_record) {
            begins[i] = offset as u64;
            offset += self.record_stride(var);
        }
        begins
    }

    pub fn header_len(&self) -> usize {
        self.header(&vec![0u64; self.vars.len()]).len()
    }

    fn header(&self, begins: &[u64]) -> Vec<u8> {
        let mut out = b"CDF".to_vec();
        out.push(self.version);
        if self.streaming {
            out.extend_from_slice(&[0xFF; 4]);
        } else {
            out.extend_from_slice(&(self.num_records() as u32).to_be_bytes());
        }

        if self.dims.is_empty() {
            out.extend_from_slice(&[0; 8]);
        } else {
            out.extend_from_slice(&NC_DIMENSION.to_be_bytes());
            out.extend_from_slice(&(self.dims.len() as u32).to_be_bytes());
            for (name, length) in &self.dims {
                put_name(&mut out, name);
                out.extend_from_slice(&length.to_be_bytes());
            }
        }

        put_atts(&mut out, &self.gatts);

        if self.vars.is_empty() {
            out.extend_from_slice(&[0; 8]);
        } else {
            out.extend_from_slice(&NC_VARIABLE.to_be_bytes());
            out.extend_from_slice(&(self.vars.len() as u32).to_be_bytes());
            for (var, &begin) in self.vars.iter().zip(begins) {
                put_name(&mut out, &var.name);
                out.extend_from_slice(&(var.dim_ids.len() as u32).to_be_bytes());
                for id in &var.dim_ids {
                    out.extend_from_slice(&id.to_be_bytes());
                }
                put_atts(&mut out, &var.atts);
                out.extend_from_slice(&var.nc_type.tag().to_be_bytes());
                out.extend_from_slice(&self.vsize(var).to_be_bytes());
                if self.version == 1 {
                    out.extend_from_slice(&(begin as u32).to_be_bytes());
                } else {
                    out.extend_from_slice(&begin.to_be_bytes());
                }
            }
        }
        out
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = self.header(&self.begins());
        for var in self.vars.iter().filter(|v| !v.is_record) {
            put_padded(&mut out, &var.chunks[0], padded(var.chunks[0].len()));
        }
        for record in 0..self.num_records() {
            for var in self.vars.iter().filter(|v| v.is_record) {
                let stride = self.record_stride(var);
                put_padded(&mut out, &var.chunks[record], stride);
            }
        }
        out
    }
}

fn put_name(out: &mut Vec<u8>, name: &str) {
    out.extend_from_slice(&(name.len() as u32).to_be_bytes());
    put_padded(out, name.as_bytes(), padded(name.len()));
}

fn put_padded(out: &mut Vec<u8>, bytes: &[u8], width: usize) {
    out.extend_from_slice(bytes);
    out.resize(out.len() + width - bytes.len(), 0);
}

fn put_atts(out: &mut Vec<u8>, atts: &[Att]) {
    if atts.is_empty() {
        out.extend_from_slice(&[0; 8]);
        return;
    }
    out.extend_from_slice(&NC_ATTRIBUTE.to_be_bytes());
    out.extend_from_slice(&(atts.len() as u32).to_be_bytes());
    for att in atts {
        put_name(out, &att.name);
        out.extend_from_slice(&att.nc_type.tag().to_be_bytes());
        out.extend_from_slice(&att.count.to_be_bytes());
        put_padded(out, &att.payload, padded(att.payload.len()));
    }
}
