mod concurrency;
mod decision;
mod http;
mod mutation;
mod tombstone;
