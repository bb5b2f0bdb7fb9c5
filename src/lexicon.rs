//! Builtin lexicon of well-known C library functions.
//!
//! Inline code that names one of these is rendered as a man page reference,
//! e.g. `malloc` becomes `\f[B]malloc\f[R](3)`.

use std::collections::HashSet;
use std::sync::LazyLock;

/// ISO C standard library.
const C_FUNCTIONS: &[&str] = &[
    // assert.h, ctype.h
    "assert", "isalnum", "isalpha", "isblank", "iscntrl", "isdigit", "isgraph", "islower",
    "isprint", "ispunct", "isspace", "isupper", "isxdigit", "tolower", "toupper",
    // errno.h, locale.h, setjmp.h, signal.h
    "localeconv", "setlocale", "longjmp", "setjmp", "raise", "signal",
    // math.h
    "acos", "acosh", "asin", "asinh", "atan", "atan2", "atanh", "cbrt", "ceil", "copysign",
    "cos", "cosh", "erf", "erfc", "exp", "exp2", "expm1", "fabs", "fdim", "floor", "fma", "fmax",
    "fmin", "fmod", "frexp", "hypot", "ilogb", "ldexp", "lgamma", "llrint", "llround", "log",
    "log10", "log1p", "log2", "logb", "lrint", "lround", "modf", "nan", "nearbyint",
    "nextafter", "nexttoward", "pow", "remainder", "remquo", "rint", "round", "scalbln",
    "scalbn", "sin", "sinh", "sqrt", "tan", "tanh", "tgamma", "trunc",
    // stdio.h
    "clearerr", "fclose", "feof", "ferror", "fflush", "fgetc", "fgetpos", "fgets", "fopen",
    "fprintf", "fputc", "fputs", "fread", "freopen", "fscanf", "fseek", "fsetpos", "ftell",
    "fwrite", "getc", "getchar", "perror", "printf", "putc", "putchar", "puts", "remove",
    "rename", "rewind", "scanf", "setbuf", "setvbuf", "snprintf", "sprintf", "sscanf",
    "tmpfile", "tmpnam", "ungetc", "vfprintf", "vfscanf", "vprintf", "vscanf", "vsnprintf",
    "vsprintf", "vsscanf",
    // stdlib.h
    "abort", "abs", "aligned_alloc", "at_quick_exit", "atexit", "atof", "atoi", "atol",
    "atoll", "bsearch", "calloc", "div", "exit", "free", "getenv", "labs", "ldiv", "llabs",
    "lldiv", "malloc", "mblen", "mbstowcs", "mbtowc", "qsort", "quick_exit", "rand",
    "realloc", "srand", "strtod", "strtof", "strtol", "strtold", "strtoll", "strtoul",
    "strtoull", "system", "wcstombs", "wctomb", "_Exit",
    // string.h
    "memchr", "memcmp", "memcpy", "memmove", "memset", "strcat", "strchr", "strcmp",
    "strcoll", "strcpy", "strcspn", "strerror", "strlen", "strncat", "strncmp", "strncpy",
    "strpbrk", "strrchr", "strspn", "strstr", "strtok", "strxfrm",
    // time.h
    "asctime", "clock", "ctime", "difftime", "gmtime", "localtime", "mktime", "strftime",
    "time", "timespec_get",
    // wchar.h, uchar.h
    "btowc", "fgetwc", "fgetws", "fputwc", "fputws", "fwide", "fwprintf", "fwscanf", "getwc",
    "getwchar", "mbrlen", "mbrtowc", "mbsinit", "mbsrtowcs", "putwc", "putwchar", "swprintf",
    "swscanf", "ungetwc", "vfwprintf", "vswprintf", "vwprintf", "wcrtomb", "wcscat", "wcschr",
    "wcscmp", "wcscpy", "wcslen", "wcsncmp", "wcsncpy", "wcsrtombs", "wcsstr", "wctob",
    "wmemchr", "wmemcmp", "wmemcpy", "wmemmove", "wmemset", "wprintf", "wscanf", "c16rtomb",
    "c32rtomb", "mbrtoc16", "mbrtoc32",
    // threads.h
    "call_once", "cnd_broadcast", "cnd_destroy", "cnd_init", "cnd_signal", "cnd_wait",
    "mtx_destroy", "mtx_init", "mtx_lock", "mtx_trylock", "mtx_unlock", "thrd_create",
    "thrd_current", "thrd_detach", "thrd_exit", "thrd_join", "thrd_sleep", "thrd_yield",
];

/// POSIX.1 interfaces commonly referenced from C library docs.
const POSIX_FUNCTIONS: &[&str] = &[
    "accept", "access", "alarm", "bind", "chdir", "chmod", "chown", "clock_gettime", "close",
    "closedir", "connect", "creat", "dirname", "basename", "dlclose", "dlerror", "dlopen",
    "dlsym", "dup", "dup2", "execl", "execle", "execlp", "execv", "execve", "execvp", "fchmod",
    "fchown", "fcntl", "fdopen", "fileno", "fork", "fstat", "fsync", "ftruncate", "getaddrinfo",
    "freeaddrinfo", "getcwd", "getline", "getopt", "getpid", "getppid", "getuid", "geteuid",
    "getgid", "gettimeofday", "ioctl", "isatty", "kill", "link", "listen", "lseek", "lstat",
    "mkdir", "mkstemp", "mmap", "munmap", "nanosleep", "open", "opendir", "pclose", "pipe",
    "poll", "popen", "posix_memalign", "pread", "pthread_attr_destroy", "pthread_attr_init",
    "pthread_cond_broadcast", "pthread_cond_destroy", "pthread_cond_init",
    "pthread_cond_signal", "pthread_cond_wait", "pthread_create", "pthread_detach",
    "pthread_join", "pthread_mutex_destroy", "pthread_mutex_init", "pthread_mutex_lock",
    "pthread_mutex_trylock", "pthread_mutex_unlock", "pthread_self", "pwrite", "read",
    "readdir", "readlink", "realpath", "recv", "recvfrom", "rmdir", "select", "send", "sendto",
    "setenv", "setsockopt", "sigaction", "sigemptyset", "sigaddset", "sigprocmask", "sleep",
    "socket", "stat", "strdup", "strndup", "strerror_r", "strnlen", "strtok_r", "symlink",
    "sysconf", "unlink", "unsetenv", "usleep", "wait", "waitpid", "write", "writev", "readv",
];

static KNOWN: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    C_FUNCTIONS
        .iter()
        .chain(POSIX_FUNCTIONS)
        .copied()
        .collect()
});

/// True when `name` is a standard C or POSIX function.
pub fn is_known_function(name: &str) -> bool {
    KNOWN.contains(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_c_and_posix_names() {
        assert!(is_known_function("malloc"));
        assert!(is_known_function("pthread_create"));
    }

    #[test]
    fn is_exact() {
        assert!(!is_known_function("Malloc"));
        assert!(!is_known_function("malloc "));
        assert!(!is_known_function("widget_open"));
    }
}
