mod interceptor;
mod session;
mod support;
