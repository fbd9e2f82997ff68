use error_chain::error_chain;

error_chain! {
    foreign_links {
        Io(std::io::Error);
        HttpRequest(reqwest::Error);
    }

    errors {
        DirectoryCreation(path: String) {
            description("couldn't create target directory")
            display("Couldn't create directory {}", path)
        }
        HttpStatus(status: u16) {
            description("server returned a non-success status")
            display("HTTP status {}", status)
        }
        Truncated(expected: u64, received: u64) {
            description("transfer ended before the whole body arrived")
            display("truncated transfer: expected {} bytes, received {}", expected, received)
        }
        InvalidManifest(line: usize, reason: String) {
            description("malformed manifest line")
            display("manifest line {}: {}", line, reason)
        }
        InvalidFilename(filename: String) {
            description("filename would escape the target directory")
            display("invalid filename {:?}", filename)
        }
        DuplicateFilename(filename: String) {
            description("filename listed more than once")
            display("duplicate filename {:?}", filename)
        }
        Download(url: String, reason: String) {
            description("download failed")
            display("Error downloading {}: {}", url, reason)
        }
    }
}
