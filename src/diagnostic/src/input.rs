//! Inputs - the named pieces of text diagnostics can point into.

/// A unique ID that corresponds to a piece of input tracked by [`Inputs`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord)]
pub struct InputId(usize);

/// A list of inputs, where each [`InputId`] is an index.
#[derive(Debug, Default)]
pub struct Inputs {
    inputs: Vec<Input>,
}

impl Inputs {
    /// Track text given as the `index`th command line argument.
    pub fn argument(&mut self, index: usize, buffer: String) -> InputId {
        self.push(Name::Argument(index), buffer)
    }

    /// Track text read from standard input.
    pub fn stdin(&mut self, buffer: String) -> InputId {
        self.push(Name::Stdin, buffer)
    }

    fn push(&mut self, name: Name, buffer: String) -> InputId {
        let id = self.inputs.len();
        self.inputs.push(Input { name, buffer });
        InputId(id)
    }

    /// The text of an input.
    pub fn get_input_buffer(&self, id: InputId) -> &str {
        self.inputs[id.0].buffer.as_str()
    }

    /// A short name for an input, suitable for prefixing messages with.
    pub fn get_input_name(&self, id: InputId) -> String {
        match self.inputs[id.0].name {
            Name::Argument(i) => format!("<arg {}>", i),
            Name::Stdin => "<stdin>".into(),
        }
    }
}

struct Input {
    name: Name,
    buffer: String,
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Input({:?}, {} bytes)", self.name, self.buffer.len())
    }
}

/// Where a piece of input came from.
#[derive(Debug)]
enum Name {
    Argument(usize),
    Stdin,
}
